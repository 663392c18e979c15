//! Console messages for the recommendation results

use crate::models::{Criterion, Movie};

const OPEN: &str = "--------->";
const CLOSE: &str = "<---------";

/// `---------> Checkout our most popular movies "A", "B", and "C"! <---------`
pub fn popular_movies_message(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return format!("{} No popular movies to show yet. {}", OPEN, CLOSE);
    }
    format!("{} Checkout our most popular movies{}", OPEN, list_names(movies))
}

/// Recommendation line for movies bought together with, or sharing genres with, `movie`
pub fn similar_movies_message(movie: &Movie, similar: &[Movie], criterion: Criterion) -> String {
    match (criterion, similar.is_empty()) {
        (Criterion::Purchases, true) => format!(
            "{} \"{}\" was not yet bought together with other movies. {}",
            OPEN, movie.name, CLOSE
        ),
        (Criterion::Genres, true) => format!(
            "{} \"{}\" has no similar genres to other movies. {}",
            OPEN, movie.name, CLOSE
        ),
        (Criterion::Purchases, false) => format!(
            "{} \"{}\" was frequently bought together with{}",
            OPEN,
            movie.name,
            list_names(similar)
        ),
        (Criterion::Genres, false) => format!(
            "{} Movies with most similar genres to \"{}\" are:{}",
            OPEN,
            movie.name,
            list_names(similar)
        ),
    }
}

fn list_names(movies: &[Movie]) -> String {
    let last = movies.len().saturating_sub(1);
    let mut text = String::new();

    for (index, movie) in movies.iter().enumerate() {
        if index < last {
            text.push_str(&format!(" \"{}\",", movie.name));
        } else if index > 0 {
            text.push_str(&format!(" and \"{}\"! {}", movie.name, CLOSE));
        } else {
            text.push_str(&format!(" \"{}\"! {}", movie.name, CLOSE));
        }
    }

    text
}
