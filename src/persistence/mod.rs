//! High score persistence
//!
//! Features:
//! - Plain JSON array on disk (`[120, 80, 40, 0, 0]`)
//! - Atomic replace (tmp → save)
//! - In-memory store for tests and embedders
//!
//! Stores only move data; recovery policy (defaults on failure, swallowed
//! write errors) lives in `HighScores::load` / `HighScores::save`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::DataError;

/// Default score file name, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "high_scores.json";

/// Durable home of the high score list
pub trait ScoreStore {
    /// Read the stored list; `Ok(None)` when nothing was ever saved
    fn load(&self) -> Result<Option<Vec<u32>>, DataError>;
    /// Replace the stored list
    fn save(&mut self, scores: &[u32]) -> Result<(), DataError>;
}

/// Scores in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<u32>>, DataError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, scores: &[u32]) -> Result<(), DataError> {
        let json = serde_json::to_string(scores)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Scores held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: Option<Vec<u32>>,
    save_count: usize,
    fail_writes: bool,
}

impl MemoryStore {
    /// Empty store (nothing saved yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a record
    pub fn with_scores(scores: Vec<u32>) -> Self {
        Self {
            scores: Some(scores),
            ..Self::default()
        }
    }

    /// Store whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Last saved list
    pub fn scores(&self) -> Option<&[u32]> {
        self.scores.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u32>>, DataError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &[u32]) -> Result<(), DataError> {
        if self.fail_writes {
            return Err(std::io::Error::new(ErrorKind::PermissionDenied, "store is read-only").into());
        }
        self.scores = Some(scores.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
