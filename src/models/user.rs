use serde::{Deserialize, Serialize};

use super::MovieId;

/// Identifier of a user in the user table
pub type UserId = u32;

/// A shop customer and their history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub viewed: Vec<MovieId>,
    pub purchased: Vec<MovieId>,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        viewed: Vec<MovieId>,
        purchased: Vec<MovieId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            viewed,
            purchased,
        }
    }
}

/// A user currently looking at a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub movie_id: MovieId,
}
