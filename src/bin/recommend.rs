//! Console demo: picks a current session and prints recommendations for it

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use movie_recommender::{
    init_tracing,
    models::Criterion,
    services::display::{popular_movies_message, similar_movies_message},
    Config, DataManager, MovieCatalog, RecommendationService,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let data = Arc::new(DataManager::load(&config.data_dir)?);
    let recommender = RecommendationService::from_config(data.clone(), &config)?;

    let sessions = data.sessions();
    anyhow::ensure!(!sessions.is_empty(), "dataset has no user sessions");

    let index = match config.session_index {
        Some(index) => index,
        None => pseudo_random_index(sessions.len()),
    };
    let session = sessions
        .get(index)
        .with_context(|| format!("session {} out of range ({} sessions)", index, sessions.len()))?;

    let user = data.user_by_id(session.user_id)?;
    let movie = data.movie_by_id(session.movie_id)?;

    println!("\n\n++++++++++ Welcome back, {}! ++++++++++\n\n", user.name);
    println!("You are currently looking at {}", movie);

    let popular = recommender.popular_movies(config.n_popular_movies)?;
    println!("{}", popular_movies_message(&popular));

    for criterion in [Criterion::Purchases, Criterion::Genres] {
        let similar = recommender.similar_movies(&movie, config.n_similar_movies, criterion)?;
        println!("{}", similar_movies_message(&movie, &similar, criterion));
    }

    Ok(())
}

/// Clock-derived index in `0..len`
fn pseudo_random_index(len: usize) -> usize {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as usize)
        .unwrap_or(0);
    nanos % len
}
