use std::borrow::Borrow;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::models::{Movie, MovieId, User, UserId};

/// Boolean movie × key table
///
/// Rows are movies, columns are the counterpart axis (users or genres). Cells are
/// stored densely in row-major order; `row_index` and `column_index` translate
/// identifiers into positions. Both axes are sorted ascending, so iteration order
/// is deterministic.
#[derive(Debug, Clone)]
pub struct IncidenceMatrix<K> {
    movie_ids: Vec<MovieId>,
    row_index: HashMap<MovieId, usize>,
    keys: Vec<K>,
    column_index: HashMap<K, usize>,
    cells: Vec<bool>,
}

/// Which users bought which movies
pub type PurchaseMatrix = IncidenceMatrix<UserId>;

/// Which movies carry which genre tags
pub type GenreMatrix = IncidenceMatrix<String>;

impl<K> IncidenceMatrix<K>
where
    K: Clone + Eq + Hash + Ord,
{
    /// Creates a zero-filled matrix over the given rows and columns
    ///
    /// Duplicate identifiers collapse into a single row or column.
    pub fn new(
        movie_ids: impl IntoIterator<Item = MovieId>,
        keys: impl IntoIterator<Item = K>,
    ) -> Self {
        let movie_ids: Vec<MovieId> = movie_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let keys: Vec<K> = keys
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let row_index = movie_ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let column_index = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();
        let cells = vec![false; movie_ids.len() * keys.len()];

        Self {
            movie_ids,
            row_index,
            keys,
            column_index,
            cells,
        }
    }

    /// Marks a cell; returns false when the movie or the key is unknown
    pub fn mark<Q>(&mut self, movie_id: MovieId, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match (self.row_index.get(&movie_id), self.column_index.get(key)) {
            (Some(&row), Some(&column)) => {
                let width = self.keys.len();
                self.cells[row * width + column] = true;
                true
            }
            _ => false,
        }
    }

    /// Reads a cell; unknown movies and keys read as unset
    pub fn get<Q>(&self, movie_id: MovieId, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match (self.row_index.get(&movie_id), self.column_index.get(key)) {
            (Some(&row), Some(&column)) => self.cells[row * self.keys.len() + column],
            _ => false,
        }
    }

    /// Row identifiers, ascending
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// Column identifiers, ascending
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The incidence vector of a movie over all columns
    pub fn row(&self, movie_id: MovieId) -> Option<&[bool]> {
        self.row_index
            .get(&movie_id)
            .map(|&row| self.row_at(row))
    }

    /// Number of set cells in a movie's row, 0 for unknown movies
    pub fn row_sum(&self, movie_id: MovieId) -> usize {
        self.row(movie_id)
            .map(|row| row.iter().filter(|cell| **cell).count())
            .unwrap_or(0)
    }

    /// Number of set cells in the whole matrix
    pub fn total(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// All rows in ascending movie order
    pub fn rows(&self) -> impl Iterator<Item = (MovieId, &[bool])> + '_ {
        self.movie_ids
            .iter()
            .enumerate()
            .map(move |(row, id)| (*id, self.row_at(row)))
    }

    fn row_at(&self, row: usize) -> &[bool] {
        let width = self.keys.len();
        &self.cells[row * width..(row + 1) * width]
    }
}

/// Builds the movie × user purchase matrix
///
/// Every movie of the table is a row and every user a column, whether or not
/// they took part in a purchase. Purchases of movies missing from the table are
/// skipped.
pub fn build_purchase_matrix(movies: &[Movie], users: &[User]) -> PurchaseMatrix {
    let mut matrix = PurchaseMatrix::new(
        movies.iter().map(|movie| movie.id),
        users.iter().map(|user| user.id),
    );

    for user in users {
        for movie_id in &user.purchased {
            if !matrix.mark(*movie_id, &user.id) {
                tracing::warn!(
                    user_id = user.id,
                    movie_id = *movie_id,
                    "Purchase references unknown movie, skipping"
                );
            }
        }
    }

    tracing::debug!(
        movies = matrix.movie_ids().len(),
        users = matrix.keys().len(),
        purchases = matrix.total(),
        "Purchase matrix built"
    );

    matrix
}

/// Builds the movie × genre matrix from the genre tags of each movie
pub fn build_genre_matrix(movies: &[Movie]) -> GenreMatrix {
    let genres = movies
        .iter()
        .flat_map(|movie| movie.genres.iter())
        .map(|genre| genre.trim())
        .filter(|genre| !genre.is_empty())
        .map(str::to_string);

    let mut matrix = GenreMatrix::new(movies.iter().map(|movie| movie.id), genres);

    for movie in movies {
        for genre in &movie.genres {
            let genre = genre.trim();
            if !genre.is_empty() {
                matrix.mark(movie.id, genre);
            }
        }
    }

    tracing::debug!(
        movies = matrix.movie_ids().len(),
        genres = matrix.keys().len(),
        "Genre matrix built"
    );

    matrix
}
