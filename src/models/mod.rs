mod movie;
mod scores;
mod user;

pub use movie::{Movie, MovieId};
pub use scores::{CorrelationEntry, Criterion, ScoreEntry};
pub use user::{Session, User, UserId};
