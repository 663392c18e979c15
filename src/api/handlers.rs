use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    data::MovieCatalog,
    error::AppResult,
    models::{Criterion, Movie, MovieId, Session, User, UserId},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub n: Option<i64>,
    /// "purchases" or "genres", defaults to purchases
    pub based_on: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimilarMoviesResponse {
    pub movie: Movie,
    pub based_on: Criterion,
    pub similar: Vec<Movie>,
}

/// Requested list length; zero and negative counts ask for nothing
fn requested_count(n: Option<i64>, default: usize) -> usize {
    match n {
        Some(n) => usize::try_from(n).unwrap_or(0),
        None => default,
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get all movies
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.data.all_movies())
}

/// Get one movie by id
pub async fn get_movie(
    State(state): State<AppState>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Json<Movie>> {
    let Path(id) = path?;
    Ok(Json(state.data.movie_by_id(id)?))
}

/// Most popular movies by rating and purchases
pub async fn popular_movies(
    State(state): State<AppState>,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Movie>>> {
    let Query(params) = query?;
    let n = requested_count(params.n, state.n_popular_movies);
    Ok(Json(state.recommender.popular_movies(n)?))
}

/// Movies bought together with, or sharing genres with, a movie
pub async fn similar_movies(
    State(state): State<AppState>,
    path: Result<Path<MovieId>, PathRejection>,
    query: Result<Query<SimilarQuery>, QueryRejection>,
) -> AppResult<Json<SimilarMoviesResponse>> {
    let Path(id) = path?;
    let Query(params) = query?;
    let based_on = match params.based_on.as_deref() {
        Some(value) => value.parse::<Criterion>()?,
        None => Criterion::Purchases,
    };
    let n = requested_count(params.n, state.n_similar_movies);

    let movie = state.data.movie_by_id(id)?;
    tracing::debug!(movie_id = id, based_on = %based_on, n, "Similar movies requested");

    let similar = state.recommender.similar_movies(&movie, n, based_on)?;

    Ok(Json(SimilarMoviesResponse {
        movie,
        based_on,
        similar,
    }))
}

/// Get one user by id
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<User>> {
    let Path(id) = path?;
    Ok(Json(state.data.user_by_id(id)?))
}

/// Get all current user sessions
pub async fn get_sessions(State(state): State<AppState>) -> Json<Vec<Session>> {
    Json(state.data.sessions().to_vec())
}
