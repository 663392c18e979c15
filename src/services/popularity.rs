use std::cmp::Ordering;

use crate::{
    data::PurchaseMatrix,
    error::{AppError, AppResult},
    models::{Movie, MovieId, ScoreEntry},
};

/// Weight of the rating component used when none is configured
pub const DEFAULT_WEIGHT_RATING: f64 = 0.85;

/// Scores every movie by a weighted blend of rating and purchase share
///
/// The rating component is the movie's rating divided by the highest rating of
/// the table; the purchase component is the movie's purchase count divided by
/// all purchases. A component whose divisor is zero scores 0 for every movie.
/// The purchase component is weighted `1 - weight_rating`, so every score stays
/// within [0, 1].
///
/// Returns one entry per movie, ascending by movie id.
pub fn score_popularity(
    movies: &[Movie],
    purchases: &PurchaseMatrix,
    weight_rating: f64,
) -> AppResult<Vec<ScoreEntry>> {
    validate_weight(weight_rating)?;
    let weight_purchases = 1.0 - weight_rating;

    let highest_rating = movies.iter().map(|m| m.rating).fold(0.0_f64, f64::max);
    let total_purchases = purchases.total();

    let mut scores: Vec<ScoreEntry> = movies
        .iter()
        .map(|movie| {
            let rating_score = if highest_rating > 0.0 {
                movie.rating / highest_rating
            } else {
                0.0
            };
            let purchase_score = if total_purchases > 0 {
                purchases.row_sum(movie.id) as f64 / total_purchases as f64
            } else {
                0.0
            };

            ScoreEntry {
                movie_id: movie.id,
                score: rating_score * weight_rating + purchase_score * weight_purchases,
            }
        })
        .collect();

    scores.sort_by_key(|entry| entry.movie_id);

    tracing::debug!(
        movies = scores.len(),
        highest_rating,
        total_purchases,
        weight_rating,
        "Popularity scores calculated"
    );

    Ok(scores)
}

/// Ids of the `n` best scored movies, ties broken by ascending id
pub fn rank_popular(scores: &[ScoreEntry], n: usize) -> Vec<MovieId> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.movie_id.cmp(&b.movie_id),
        other => other,
    });

    ranked.into_iter().take(n).map(|entry| entry.movie_id).collect()
}

pub(crate) fn validate_weight(weight_rating: f64) -> AppResult<()> {
    if !(0.0..=1.0).contains(&weight_rating) {
        return Err(AppError::InvalidArgument(format!(
            "weight_rating must be within [0, 1], got {}",
            weight_rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_purchase_matrix;
    use crate::models::User;

    const EPSILON: f64 = 1e-12;

    /// Five movies rated 5..1; movie 1 bought three times, movies 2 and 3 once
    fn fixture() -> (Vec<Movie>, PurchaseMatrix) {
        let movies: Vec<Movie> = (1..=5)
            .map(|id| Movie::new(id, format!("Movie {}", id), 2000, vec![], 6.0 - id as f64, 9.99))
            .collect();
        let users = vec![
            User::new(1, "Ann", vec![], vec![1, 2]),
            User::new(2, "Bob", vec![], vec![1, 3]),
            User::new(3, "Cid", vec![], vec![1]),
        ];
        let matrix = build_purchase_matrix(&movies, &users);
        (movies, matrix)
    }

    #[test]
    fn test_blended_score_matches_hand_calculation() {
        let (movies, matrix) = fixture();
        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();

        // movie 1: rating 5/5, purchases 3/5
        assert!((scores[0].score - (0.85 * 1.0 + 0.15 * 0.6)).abs() < EPSILON);
        // movie 2: rating 4/5, purchases 1/5
        assert!((scores[1].score - (0.85 * 0.8 + 0.15 * 0.2)).abs() < EPSILON);
        // movie 5: rating 1/5, never bought
        assert!((scores[4].score - 0.85 * 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_scores_sorted_by_movie_id() {
        let (mut movies, matrix) = fixture();
        movies.reverse();
        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();
        let ids: Vec<MovieId> = scores.iter().map(|s| s.movie_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let (movies, matrix) = fixture();
        for weight in [0.0, 0.1, 0.5, 0.85, 1.0] {
            let scores = score_popularity(&movies, &matrix, weight).unwrap();
            assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
        }
    }

    #[test]
    fn test_weight_outside_unit_interval_is_rejected() {
        let (movies, matrix) = fixture();
        for weight in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = score_popularity(&movies, &matrix, weight).unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_zero_ratings_and_zero_purchases_score_zero() {
        let movies = vec![
            Movie::new(1, "A", 2000, vec![], 0.0, 1.0),
            Movie::new(2, "B", 2000, vec![], 0.0, 1.0),
        ];
        let users = vec![User::new(1, "Ann", vec![], vec![])];
        let matrix = build_purchase_matrix(&movies, &users);

        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();
        assert!(scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_zero_ratings_keep_purchase_component() {
        let movies = vec![
            Movie::new(1, "A", 2000, vec![], 0.0, 1.0),
            Movie::new(2, "B", 2000, vec![], 0.0, 1.0),
            Movie::new(3, "C", 2000, vec![], 0.0, 1.0),
        ];
        let users = vec![
            User::new(1, "Ann", vec![], vec![1, 2]),
            User::new(2, "Bob", vec![], vec![1]),
        ];
        let matrix = build_purchase_matrix(&movies, &users);

        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();

        // purchase shares 2/3, 1/3, 0
        assert!((scores[0].score - 0.15 * (2.0 / 3.0)).abs() < EPSILON);
        assert!((scores[1].score - 0.15 * (1.0 / 3.0)).abs() < EPSILON);
        assert_eq!(scores[2].score, 0.0);
    }

    #[test]
    fn test_no_purchases_keep_rating_component() {
        let movies = vec![
            Movie::new(1, "A", 2000, vec![], 4.0, 1.0),
            Movie::new(2, "B", 2000, vec![], 2.0, 1.0),
        ];
        let users = vec![User::new(1, "Ann", vec![1], vec![])];
        let matrix = build_purchase_matrix(&movies, &users);

        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();

        assert!((scores[0].score - 0.85).abs() < EPSILON);
        assert!((scores[1].score - 0.85 * 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_rank_popular_orders_by_score() {
        let (movies, matrix) = fixture();
        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();
        assert_eq!(rank_popular(&scores, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_rank_popular_breaks_ties_by_id() {
        let scores = vec![
            ScoreEntry { movie_id: 9, score: 0.5 },
            ScoreEntry { movie_id: 4, score: 0.5 },
            ScoreEntry { movie_id: 7, score: 0.9 },
        ];
        assert_eq!(rank_popular(&scores, 3), vec![7, 4, 9]);
        assert_eq!(rank_popular(&scores, 3), rank_popular(&scores, 3));
    }

    #[test]
    fn test_rank_popular_truncates_and_handles_zero() {
        let (movies, matrix) = fixture();
        let scores = score_popularity(&movies, &matrix, 0.85).unwrap();
        assert_eq!(rank_popular(&scores, 50).len(), 5);
        assert!(rank_popular(&scores, 0).is_empty());
    }
}
