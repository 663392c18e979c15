//! Movie recommendations from small text-file datasets
//!
//! Two kinds of recommendations are offered: globally popular movies, scored by
//! a weighted blend of rating and purchase share, and movies similar to a given
//! movie, ranked by the Pearson correlation of their purchase or genre
//! incidence vectors.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use data::{DataManager, MovieCatalog};
pub use error::{AppError, AppResult};
pub use services::RecommendationService;

/// Installs the `tracing` subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
