//! In-memory dataset and its derived incidence matrices

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, Session, User, UserId},
};

pub mod incidence;
pub mod loader;

pub use incidence::{
    build_genre_matrix, build_purchase_matrix, GenreMatrix, IncidenceMatrix, PurchaseMatrix,
};

/// Read access to movies, users and their incidence matrices
///
/// Recommenders only read through this trait, so a catalog can be shared by
/// concurrent requests once it is built.
#[cfg_attr(test, mockall::automock)]
pub trait MovieCatalog: Send + Sync {
    /// All movies, ascending by id
    fn all_movies(&self) -> Vec<Movie>;

    /// All users, ascending by id
    fn all_users(&self) -> Vec<User>;

    fn movie_by_id(&self, id: MovieId) -> AppResult<Movie>;

    fn user_by_id(&self, id: UserId) -> AppResult<User>;

    fn purchase_matrix(&self) -> &PurchaseMatrix;

    fn genre_matrix(&self) -> &GenreMatrix;
}

/// Owns the user, movie and session tables of one dataset
///
/// Both incidence matrices are computed once here and never change afterwards.
#[derive(Debug)]
pub struct DataManager {
    movies: BTreeMap<MovieId, Movie>,
    users: BTreeMap<UserId, User>,
    sessions: Vec<Session>,
    purchases: PurchaseMatrix,
    genres: GenreMatrix,
}

impl DataManager {
    pub fn new(movies: Vec<Movie>, users: Vec<User>, sessions: Vec<Session>) -> AppResult<Self> {
        let start = Instant::now();

        let purchases = build_purchase_matrix(&movies, &users);
        let genres = build_genre_matrix(&movies);

        let mut movie_table = BTreeMap::new();
        for movie in movies {
            let id = movie.id;
            if movie_table.insert(id, movie).is_some() {
                return Err(AppError::InvalidArgument(format!("duplicate movie id {}", id)));
            }
        }

        let mut user_table = BTreeMap::new();
        for user in users {
            let id = user.id;
            if user_table.insert(id, user).is_some() {
                return Err(AppError::InvalidArgument(format!("duplicate user id {}", id)));
            }
        }

        for session in &sessions {
            if !user_table.contains_key(&session.user_id)
                || !movie_table.contains_key(&session.movie_id)
            {
                tracing::warn!(
                    user_id = session.user_id,
                    movie_id = session.movie_id,
                    "Session references unknown user or movie"
                );
            }
        }

        tracing::info!(
            movies = movie_table.len(),
            users = user_table.len(),
            sessions = sessions.len(),
            purchases = purchases.total(),
            genres = genres.keys().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Dataset loaded"
        );

        Ok(Self {
            movies: movie_table,
            users: user_table,
            sessions,
            purchases,
            genres,
        })
    }

    /// Reads Products.txt, Users.txt and CurrentUserSession.txt from a directory
    pub fn load(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref();
        tracing::info!(data_dir = %data_dir.display(), "Loading dataset");

        let movies = loader::read_movies(data_dir)?;
        let users = loader::read_users(data_dir)?;
        let sessions = loader::read_sessions(data_dir)?;

        Self::new(movies, users, sessions)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }
}

impl MovieCatalog for DataManager {
    fn all_movies(&self) -> Vec<Movie> {
        self.movies.values().cloned().collect()
    }

    fn all_users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn movie_by_id(&self, id: MovieId) -> AppResult<Movie> {
        self.movies
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("movie {}", id)))
    }

    fn user_by_id(&self, id: UserId) -> AppResult<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    fn purchase_matrix(&self) -> &PurchaseMatrix {
        &self.purchases
    }

    fn genre_matrix(&self) -> &GenreMatrix {
        &self.genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataManager {
        let movies = vec![
            Movie::new(2, "Amelie", 2001, vec!["Comedy".to_string()], 4.1, 7.5),
            Movie::new(1, "Inception", 2010, vec!["Action".to_string()], 4.8, 12.99),
        ];
        let users = vec![
            User::new(10, "Ann", vec![1, 2], vec![1]),
            User::new(20, "Bob", vec![2], vec![]),
        ];
        let sessions = vec![Session { user_id: 10, movie_id: 2 }];
        DataManager::new(movies, users, sessions).unwrap()
    }

    #[test]
    fn test_lookup_by_id() {
        let data = sample();
        assert_eq!(data.movie_by_id(1).unwrap().name, "Inception");
        assert_eq!(data.user_by_id(20).unwrap().name, "Bob");
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let data = sample();
        assert!(matches!(data.movie_by_id(99), Err(AppError::NotFound(_))));
        assert!(matches!(data.user_by_id(99), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_tables_are_sorted_by_id() {
        let data = sample();
        let ids: Vec<MovieId> = data.all_movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(data.all_users().len(), 2);
        assert_eq!(data.sessions().len(), 1);
    }

    #[test]
    fn test_matrices_built_on_construction() {
        let data = sample();
        assert!(data.purchase_matrix().get(1, &10));
        assert_eq!(data.purchase_matrix().keys(), &[10, 20]);
        assert!(data.genre_matrix().get(2, "Comedy"));
    }

    #[test]
    fn test_duplicate_movie_ids_rejected() {
        let movies = vec![
            Movie::new(1, "A", 2000, vec![], 1.0, 1.0),
            Movie::new(1, "B", 2000, vec![], 1.0, 1.0),
        ];
        let err = DataManager::new(movies, vec![], vec![]).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
