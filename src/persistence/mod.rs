//! Score Persistence
//!
//! The only file I/O the games perform.

pub mod high_scores;

pub use high_scores::{HighScoreTable, PersistenceError, ScoreEntry, ScoreStore};
