use std::sync::Arc;

use movie_recommender::{api::create_router, api::AppState, init_tracing, Config, DataManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // Dataset and matrices are built once and shared read-only by all requests
    let data = Arc::new(DataManager::load(&config.data_dir)?);
    let state = AppState::new(data, &config)?;

    let app = create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
