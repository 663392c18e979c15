use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::MovieId;
use crate::error::AppError;

/// Popularity of one movie, between 0 and 1
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScoreEntry {
    pub movie_id: MovieId,
    pub score: f64,
}

/// Correlation of one movie with a target movie, between -1 and 1
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CorrelationEntry {
    pub movie_id: MovieId,
    pub correlation: f64,
}

/// What movie similarity is measured on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Movies bought by the same users ("frequently bought together")
    Purchases,
    /// Movies sharing genre tags
    Genres,
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Purchases => write!(f, "purchases"),
            Criterion::Genres => write!(f, "genres"),
        }
    }
}

impl FromStr for Criterion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchases" => Ok(Criterion::Purchases),
            "genres" => Ok(Criterion::Genres),
            other => Err(AppError::InvalidArgument(format!(
                "unsupported similarity criterion '{}', expected 'purchases' or 'genres'",
                other
            ))),
        }
    }
}
