//! High score leaderboard system
//!
//! Persisted through a `ScoreStore`, tracks the top 5 scores.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// High score leaderboard (sorted descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    scores: Vec<u32>,
}

impl Default for HighScores {
    /// A fresh board is five zeros
    fn default() -> Self {
        Self {
            scores: vec![0; MAX_HIGH_SCORES],
        }
    }
}

impl HighScores {
    /// Build a board from arbitrary scores (sorted, trimmed)
    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    /// Scores, best first
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Check if a score would change the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if self.scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.scores.last().map(|&s| score > s).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.scores.iter().position(|&s| score > s);
        Some(rank.unwrap_or(self.scores.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn record(&mut self, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.scores.insert(rank - 1, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Load high scores from a store; never fails
    ///
    /// A missing, unreadable or corrupt record yields a fresh board.
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.load() {
            Ok(Some(scores)) => {
                let board = Self::from_scores(scores);
                log::info!("Loaded {} high scores", board.scores.len());
                board
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High scores unreadable, starting fresh: {}", e);
                Self::default()
            }
        }
    }

    /// Save high scores to a store; failures are logged and dropped
    pub fn save(&self, store: &mut dyn ScoreStore) {
        match store.save(&self.scores) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.scores.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_default_is_five_zeros() {
        assert_eq!(HighScores::default().scores(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_record_keeps_top_five_descending() {
        let mut board = HighScores::default();
        assert_eq!(board.record(40), Some(1));
        assert_eq!(board.record(90), Some(1));
        assert_eq!(board.record(60), Some(2));
        assert_eq!(board.scores(), &[90, 60, 40, 0, 0]);

        board.record(10);
        board.record(20);
        assert_eq!(board.scores(), &[90, 60, 40, 20, 10]);

        // Ties with the lowest entry do not displace it
        assert_eq!(board.record(10), None);
        assert_eq!(board.record(5), None);
        assert_eq!(board.record(70), Some(2));
        assert_eq!(board.scores(), &[90, 70, 60, 40, 20]);
        assert_eq!(board.top_score(), Some(90));
    }

    #[test]
    fn test_zero_does_not_change_fresh_board() {
        let mut board = HighScores::default();
        assert_eq!(board.record(0), None);
        assert_eq!(board, HighScores::default());
    }

    #[test]
    fn test_short_board_accepts_anything() {
        let mut board = HighScores::from_scores(vec![3, 8]);
        assert_eq!(board.scores(), &[8, 3]);
        assert_eq!(board.potential_rank(0), Some(3));
        board.record(0);
        assert_eq!(board.scores(), &[8, 3, 0]);
    }

    #[test]
    fn test_from_scores_sorts_and_trims() {
        let board = HighScores::from_scores(vec![1, 9, 4, 7, 3, 8, 2]);
        assert_eq!(board.scores(), &[9, 8, 7, 4, 3]);
    }

    #[test]
    fn test_load_save_round_trip() {
        let mut store = MemoryStore::with_scores(vec![5, 50, 15]);
        let board = HighScores::load(&store);
        board.save(&mut store);
        assert_eq!(HighScores::load(&store), board);
        assert_eq!(board.scores(), &[50, 15, 5]);
    }

    #[test]
    fn test_load_missing_is_default() {
        let store = MemoryStore::new();
        assert_eq!(HighScores::load(&store), HighScores::default());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut store = MemoryStore::failing();
        let mut board = HighScores::default();
        board.record(30);
        board.save(&mut store);
        assert_eq!(store.save_count(), 0);
        assert_eq!(HighScores::load(&store), HighScores::default());
    }
}
