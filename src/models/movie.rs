use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a movie in the product table
pub type MovieId = u32;

/// A movie offered in the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    /// Year of first release
    pub year: i32,
    /// Genre tags in table order, empty slots already removed
    pub genres: Vec<String>,
    /// Average user review between 0 and 5
    pub rating: f64,
    pub price: f64,
}

impl Movie {
    pub fn new(
        id: MovieId,
        name: impl Into<String>,
        year: i32,
        genres: Vec<String>,
        rating: f64,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            year,
            genres,
            rating,
            price,
        }
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "====== Movie ======")?;
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "year: {}", self.year)?;
        writeln!(f, "genres: {}", self.genres.join(", "))?;
        writeln!(f, "rating: {:?}", self.rating)?;
        writeln!(f, "price: {:?}", self.price)?;
        writeln!(f, "===================")
    }
}
