use std::sync::Arc;

use crate::{
    config::Config,
    data::MovieCatalog,
    error::AppResult,
    models::{Criterion, Movie, MovieId},
};

use super::{
    popularity::{rank_popular, score_popularity, validate_weight},
    similarity::SimilarityRanker,
};

/// Answers popularity and similarity questions against a movie catalog
///
/// Holds no data of its own: every call scores the catalog's current matrices
/// and resolves the winning ids back into movies.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn MovieCatalog>,
    weight_rating: f64,
    ranker: SimilarityRanker,
}

impl RecommendationService {
    /// Fails with `InvalidArgument` when the weight lies outside [0, 1] or the
    /// threshold outside [-1, 1]
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        weight_rating: f64,
        correlation_threshold: f64,
    ) -> AppResult<Self> {
        validate_weight(weight_rating)?;

        Ok(Self {
            catalog,
            weight_rating,
            ranker: SimilarityRanker::new(correlation_threshold)?,
        })
    }

    pub fn from_config(catalog: Arc<dyn MovieCatalog>, config: &Config) -> AppResult<Self> {
        Self::new(catalog, config.weight_rating, config.correlation_threshold)
    }

    pub fn catalog(&self) -> &dyn MovieCatalog {
        self.catalog.as_ref()
    }

    /// The `n` most popular movies, best first
    pub fn popular_movies(&self, n: usize) -> AppResult<Vec<Movie>> {
        let movies = self.catalog.all_movies();
        let scores = score_popularity(&movies, self.catalog.purchase_matrix(), self.weight_rating)?;
        let ids = rank_popular(&scores, n);

        tracing::info!(requested = n, returned = ids.len(), "Popular movies ranked");

        self.resolve(&ids)
    }

    /// Up to `n` movies most similar to `movie`, most similar first
    ///
    /// Returns an empty list when no movie correlates above the threshold.
    pub fn similar_movies(
        &self,
        movie: &Movie,
        n: usize,
        criterion: Criterion,
    ) -> AppResult<Vec<Movie>> {
        let ids = match criterion {
            Criterion::Purchases => {
                self.ranker
                    .most_similar(movie.id, self.catalog.purchase_matrix(), n)
            }
            Criterion::Genres => self
                .ranker
                .most_similar(movie.id, self.catalog.genre_matrix(), n),
        };

        tracing::info!(
            movie_id = movie.id,
            criterion = %criterion,
            requested = n,
            returned = ids.len(),
            "Similar movies ranked"
        );

        self.resolve(&ids)
    }

    fn resolve(&self, ids: &[MovieId]) -> AppResult<Vec<Movie>> {
        ids.iter().map(|id| self.catalog.movie_by_id(*id)).collect()
    }
}
