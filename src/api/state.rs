use std::sync::Arc;

use crate::{config::Config, data::DataManager, error::AppResult, services::RecommendationService};

/// Shared application state
///
/// The dataset is immutable after loading, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataManager>,
    pub recommender: RecommendationService,
    pub n_popular_movies: usize,
    pub n_similar_movies: usize,
}

impl AppState {
    /// Creates the state for a loaded dataset, validating the scoring settings
    pub fn new(data: Arc<DataManager>, config: &Config) -> AppResult<Self> {
        let recommender = RecommendationService::from_config(data.clone(), config)?;

        Ok(Self {
            data,
            recommender,
            n_popular_movies: config.n_popular_movies,
            n_similar_movies: config.n_similar_movies,
        })
    }
}
