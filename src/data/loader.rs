//! Readers for the comma-separated dataset files
//!
//! Files carry no header. Fields are separated by commas with optional
//! whitespace around them; list fields use semicolons. Blank lines are ignored.

use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, Session, User, UserId},
};

pub const MOVIES_FILE: &str = "Products.txt";
pub const USERS_FILE: &str = "Users.txt";
pub const SESSIONS_FILE: &str = "CurrentUserSession.txt";

const MOVIE_COLUMNS: usize = 10;
const GENRE_COLUMNS: std::ops::Range<usize> = 3..8;
const USER_COLUMNS: usize = 4;
const SESSION_COLUMNS: usize = 2;
const MAX_RATING: f64 = 5.0;

pub fn read_movies(data_dir: &Path) -> AppResult<Vec<Movie>> {
    let content = std::fs::read_to_string(data_dir.join(MOVIES_FILE))?;
    parse_movies(MOVIES_FILE, &content)
}

pub fn read_users(data_dir: &Path) -> AppResult<Vec<User>> {
    let content = std::fs::read_to_string(data_dir.join(USERS_FILE))?;
    parse_users(USERS_FILE, &content)
}

pub fn read_sessions(data_dir: &Path) -> AppResult<Vec<Session>> {
    let content = std::fs::read_to_string(data_dir.join(SESSIONS_FILE))?;
    parse_sessions(SESSIONS_FILE, &content)
}

/// Parses `movie_id, movie_name, year, keyword1..keyword5, rating, price` rows
pub fn parse_movies(file: &str, content: &str) -> AppResult<Vec<Movie>> {
    let mut movies = Vec::new();
    let mut seen = HashSet::new();

    for (line, fields) in records(content) {
        expect_columns(file, line, &fields, MOVIE_COLUMNS)?;

        let id: MovieId = parse_field(file, line, "movie_id", fields[0])?;
        if !seen.insert(id) {
            return Err(AppError::parse(file, line, format!("duplicate movie_id {}", id)));
        }

        let genres = fields[GENRE_COLUMNS]
            .iter()
            .filter(|genre| !genre.is_empty())
            .map(|genre| genre.to_string())
            .collect();

        let rating: f64 = parse_field(file, line, "rating", fields[8])?;
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(AppError::parse(
                file,
                line,
                format!("rating {} outside [0, {}]", rating, MAX_RATING),
            ));
        }

        let price: f64 = parse_field(file, line, "price", fields[9])?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::parse(file, line, format!("invalid price {}", price)));
        }

        movies.push(Movie::new(
            id,
            fields[1],
            parse_field(file, line, "year", fields[2])?,
            genres,
            rating,
            price,
        ));
    }

    Ok(movies)
}

/// Parses `user_id, user_name, viewed, purchased` rows
pub fn parse_users(file: &str, content: &str) -> AppResult<Vec<User>> {
    let mut users = Vec::new();
    let mut seen = HashSet::new();

    for (line, fields) in records(content) {
        expect_columns(file, line, &fields, USER_COLUMNS)?;

        let id: UserId = parse_field(file, line, "user_id", fields[0])?;
        if !seen.insert(id) {
            return Err(AppError::parse(file, line, format!("duplicate user_id {}", id)));
        }

        users.push(User::new(
            id,
            fields[1],
            parse_id_list(file, line, "viewed", fields[2])?,
            parse_id_list(file, line, "purchased", fields[3])?,
        ));
    }

    Ok(users)
}

/// Parses `user_id, movie_id` rows
pub fn parse_sessions(file: &str, content: &str) -> AppResult<Vec<Session>> {
    records(content)
        .map(|(line, fields)| -> AppResult<Session> {
            expect_columns(file, line, &fields, SESSION_COLUMNS)?;
            Ok(Session {
                user_id: parse_field(file, line, "user_id", fields[0])?,
                movie_id: parse_field(file, line, "movie_id", fields[1])?,
            })
        })
        .collect()
}

/// Non-blank lines split into trimmed fields, with 1-based line numbers
fn records(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.split(',').map(str::trim).collect()))
}

fn expect_columns(file: &str, line: usize, fields: &[&str], expected: usize) -> AppResult<()> {
    if fields.len() != expected {
        return Err(AppError::parse(
            file,
            line,
            format!("expected {} columns, found {}", expected, fields.len()),
        ));
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(
    file: &str,
    line: usize,
    column: &str,
    value: &str,
) -> AppResult<T> {
    value.parse().map_err(|_| {
        AppError::parse(file, line, format!("invalid {} '{}'", column, value))
    })
}

fn parse_id_list(file: &str, line: usize, column: &str, value: &str) -> AppResult<Vec<MovieId>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| parse_field(file, line, column, id))
        .collect()
}
