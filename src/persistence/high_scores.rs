//! High Score Tables
//!
//! One JSON file per game holding the best ten `{name, score}` records,
//! highest first. Tables are loaded and saved whole.
//!
//! Writes are best-effort from the game's point of view: a failed save is
//! logged and the session carries on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

/// Entries kept per table.
pub const MAX_ENTRIES: usize = 10;

/// Default directory for score files.
pub const DEFAULT_SCORE_DIR: &str = "scores";

/// Score file errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One table row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Best scores for one game, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary rows: sorted, highest first, capped.
    ///
    /// Equal scores keep their original relative order.
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best `n` rows.
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Would `score` make the table?
    pub fn is_high_score(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= MAX_ENTRIES => score > lowest.score,
            _ => true,
        }
    }

    /// 1-based rank `score` would take. Ties rank below existing rows.
    pub fn rank_of(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Add a row. Returns its 1-based rank, or `None` if it did not make
    /// the table.
    pub fn insert(&mut self, name: impl Into<String>, score: u32) -> Option<usize> {
        let rank = self.rank_of(score);
        if rank > MAX_ENTRIES {
            return None;
        }
        self.entries.insert(rank - 1, ScoreEntry { name: name.into(), score });
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, PersistenceError> {
        let entries: Vec<ScoreEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Load a table. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the table, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Score files for every game under one directory.
#[derive(Clone, Debug)]
pub struct ScoreStore {
    dir: PathBuf,
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_DIR)
    }
}

impl ScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `{dir}/{game}_scores.json`
    pub fn path_for(&self, game: &str) -> PathBuf {
        self.dir.join(format!("{game}_scores.json"))
    }

    pub fn load(&self, game: &str) -> Result<HighScoreTable, PersistenceError> {
        HighScoreTable::load(&self.path_for(game))
    }

    /// Add a score to a game's table and write it back.
    pub fn record(&self, game: &str, name: &str, score: u32) -> Result<Option<usize>, PersistenceError> {
        let mut table = self.load(game)?;
        let rank = table.insert(name, score);
        if rank.is_some() {
            table.save(&self.path_for(game))?;
        }
        debug!(game, name, score, ?rank, "score recorded");
        Ok(rank)
    }

    /// [`record`](Self::record), logging and dropping any failure.
    pub fn record_best_effort(&self, game: &str, name: &str, score: u32) -> Option<usize> {
        match self.record(game, name, score) {
            Ok(rank) => rank,
            Err(e) => {
                warn!(game, score, error = %e, "failed to record high score");
                None
            }
        }
    }
}
