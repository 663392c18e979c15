use std::cmp::Ordering;
use std::hash::Hash;

use crate::{
    data::IncidenceMatrix,
    error::{AppError, AppResult},
    models::{CorrelationEntry, MovieId},
};

/// Threshold of a ranker built without configuration
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.6;

/// Ranks movies by how strongly their incidence vectors correlate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityRanker {
    correlation_threshold: f64,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }
}

impl SimilarityRanker {
    /// Creates a ranker dropping correlations below `correlation_threshold`
    pub fn new(correlation_threshold: f64) -> AppResult<Self> {
        if !(-1.0..=1.0).contains(&correlation_threshold) {
            return Err(AppError::InvalidArgument(format!(
                "correlation_threshold must be within [-1, 1], got {}",
                correlation_threshold
            )));
        }
        Ok(Self {
            correlation_threshold,
        })
    }

    pub fn correlation_threshold(&self) -> f64 {
        self.correlation_threshold
    }

    /// Correlates the target movie's row with every other row of the matrix
    ///
    /// Rows without variance have no defined correlation and are skipped, as is
    /// the target itself. The result holds only correlations at or above the
    /// threshold, highest first, ties by ascending movie id. A target that is
    /// not a row of the matrix yields an empty result.
    pub fn correlate<K>(&self, target: MovieId, matrix: &IncidenceMatrix<K>) -> Vec<CorrelationEntry>
    where
        K: Clone + Eq + Hash + Ord,
    {
        let Some(target_row) = matrix.row(target) else {
            tracing::debug!(movie_id = target, "Movie absent from incidence matrix");
            return Vec::new();
        };

        let mut correlations: Vec<CorrelationEntry> = matrix
            .rows()
            .filter(|(movie_id, _)| *movie_id != target)
            .filter_map(|(movie_id, row)| {
                pearson(target_row, row).map(|correlation| CorrelationEntry {
                    movie_id,
                    correlation,
                })
            })
            .filter(|entry| entry.correlation >= self.correlation_threshold)
            .collect();

        correlations.sort_by(|a, b| match b.correlation.total_cmp(&a.correlation) {
            Ordering::Equal => a.movie_id.cmp(&b.movie_id),
            other => other,
        });

        tracing::debug!(
            movie_id = target,
            qualifying = correlations.len(),
            threshold = self.correlation_threshold,
            "Correlations calculated"
        );

        correlations
    }

    /// Ids of the `n` movies correlating best with the target
    pub fn most_similar<K>(&self, target: MovieId, matrix: &IncidenceMatrix<K>, n: usize) -> Vec<MovieId>
    where
        K: Clone + Eq + Hash + Ord,
    {
        self.correlate(target, matrix)
            .into_iter()
            .take(n)
            .map(|entry| entry.movie_id)
            .collect()
    }
}

/// Pearson correlation of two 0/1 vectors of equal length
///
/// With `a` and `b` set cells in each vector and `c` cells set in both, the
/// coefficient reduces to `(n*c - a*b) / sqrt((n*a - a²)(n*b - b²))`. Returns
/// `None` when either vector has zero variance (all unset or all set).
pub fn pearson(x: &[bool], y: &[bool]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }

    let n = x.len() as f64;
    let a = x.iter().filter(|v| **v).count() as f64;
    let b = y.iter().filter(|v| **v).count() as f64;
    let c = x.iter().zip(y).filter(|(u, v)| **u && **v).count() as f64;

    let variance_x = n * a - a * a;
    let variance_y = n * b - b * b;
    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    let correlation = (n * c - a * b) / (variance_x * variance_y).sqrt();
    Some(correlation.clamp(-1.0, 1.0))
}
