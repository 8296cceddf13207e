//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the sim.
//! Loaded from JSON; any missing field falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Longest time a single word may be given (seconds)
pub const MAX_WORD_TIME_SECS: f32 = 3600.0;

/// Difficulty bucket of the word lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }
}

/// Word pools, one per tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            easy: words(&[
                "quick", "chase", "speed", "race", "word", "type", "fast", "run", "jump", "dash",
            ]),
            medium: words(&[
                "escape", "catch", "pursuit", "sprint", "hurry", "track", "hunt", "follow",
                "overtake",
            ]),
            hard: words(&[
                "acceleration",
                "velocity",
                "momentum",
                "persistence",
                "determination",
                "endurance",
            ]),
        }
    }
}

impl Lexicon {
    pub fn pool(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Pursuer ===
    /// Pursuer speed at level 1 (px/tick)
    pub pursuer_base_speed: f32,
    /// Multiplier on ln(level) added to the base speed
    pub pursuer_speed_scale: f32,
    /// How far past the right edge the pursuer must get to escape (px)
    pub escape_margin: f32,

    // === Word challenge ===
    pub lexicon: Lexicon,
    /// First level drawing from the medium pool
    pub medium_tier_level: u32,
    /// First level drawing from the hard pool
    pub hard_tier_level: u32,
    /// Seconds allowed per word at level 1
    pub word_time_base: f32,
    /// Seconds removed per level
    pub word_time_decrement: f32,
    /// Minimum seconds per word
    pub word_time_floor: f32,
    /// Input buffer capacity (characters)
    pub max_input_len: usize,

    // === Rewards and penalties ===
    /// Player advance on a correct word (px)
    pub match_player_advance: f32,
    /// Pursuer setback on a correct word (px)
    pub match_pursuer_setback: f32,
    /// Pursuer advance on a wrong word (px)
    pub miss_pursuer_advance: f32,
    /// Points per correct word, multiplied by level
    pub points_per_word: u32,
    /// Level N ends once score reaches N times this
    pub level_up_step: u32,

    // === Obstacles ===
    /// Ticks between spawn attempts
    pub obstacle_interval_ticks: u32,
    /// Obstacles only appear from this level on
    pub obstacle_min_level: u32,
    /// Chance that a spawn attempt succeeds (0-1)
    pub obstacle_spawn_chance: f32,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    /// Scroll speed per level (px/tick)
    pub obstacle_scroll_per_level: f32,
    /// Player knockback on hit (px)
    pub obstacle_knockback: f32,
    /// Score lost on hit
    pub obstacle_penalty: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pursuer_base_speed: 2.0,
            pursuer_speed_scale: 0.3,
            escape_margin: 5000.0,

            lexicon: Lexicon::default(),
            medium_tier_level: 5,
            hard_tier_level: 10,
            word_time_base: 15.0,
            word_time_decrement: 1.0,
            word_time_floor: 5.0,
            max_input_len: 20,

            match_player_advance: 1000.0,
            match_pursuer_setback: 300.0,
            miss_pursuer_advance: 20.0,
            points_per_word: 10,
            level_up_step: 100,

            obstacle_interval_ticks: 180,
            obstacle_min_level: 3,
            obstacle_spawn_chance: 0.3,
            obstacle_width: 30.0,
            obstacle_min_height: 20.0,
            obstacle_max_height: 50.0,
            obstacle_scroll_per_level: 2.0,
            obstacle_knockback: 20.0,
            obstacle_penalty: 5,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, sanitizing the result
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(DataError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values so the sim never sees them
    pub fn sanitized(mut self) -> Self {
        let defaults = Lexicon::default();
        if self.lexicon.easy.is_empty() {
            self.lexicon.easy = defaults.easy;
        }
        if self.lexicon.medium.is_empty() {
            self.lexicon.medium = defaults.medium;
        }
        if self.lexicon.hard.is_empty() {
            self.lexicon.hard = defaults.hard;
        }

        self.medium_tier_level = self.medium_tier_level.max(1);
        self.hard_tier_level = self.hard_tier_level.max(self.medium_tier_level);
        self.word_time_floor = self.word_time_floor.max(0.0).min(MAX_WORD_TIME_SECS);
        self.word_time_base = self
            .word_time_base
            .max(self.word_time_floor)
            .min(MAX_WORD_TIME_SECS);
        self.word_time_decrement = self.word_time_decrement.max(0.0);
        self.pursuer_base_speed = self.pursuer_base_speed.max(0.0);
        self.pursuer_speed_scale = self.pursuer_speed_scale.max(0.0);
        self.obstacle_scroll_per_level = self.obstacle_scroll_per_level.max(0.0);
        self.max_input_len = self.max_input_len.max(1);
        self.level_up_step = self.level_up_step.max(1);
        self.obstacle_interval_ticks = self.obstacle_interval_ticks.max(1);
        self.obstacle_spawn_chance = self.obstacle_spawn_chance.clamp(0.0, 1.0);
        self.obstacle_min_height = self.obstacle_min_height.max(1.0);
        self.obstacle_max_height = self.obstacle_max_height.max(self.obstacle_min_height);
        self.obstacle_width = self.obstacle_width.max(1.0);
        self
    }

    /// Pursuer speed for a level: logarithmic, never decreasing
    pub fn pursuer_speed(&self, level: u32) -> f32 {
        self.pursuer_base_speed + (level.max(1) as f32).ln() * self.pursuer_speed_scale
    }

    /// Obstacle scroll speed for a level (px/tick)
    pub fn scroll_speed(&self, level: u32) -> f32 {
        self.obstacle_scroll_per_level * level as f32
    }

    /// Lexicon tier for a level
    pub fn tier(&self, level: u32) -> Tier {
        if level < self.medium_tier_level {
            Tier::Easy
        } else if level < self.hard_tier_level {
            Tier::Medium
        } else {
            Tier::Hard
        }
    }

    /// Time allowed to type one word at a level
    pub fn word_time_limit(&self, level: u32) -> Duration {
        let shrink = level.saturating_sub(1) as f32 * self.word_time_decrement;
        let secs = (self.word_time_base - shrink)
            .max(self.word_time_floor)
            .clamp(0.0, MAX_WORD_TIME_SECS);
        Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
    }

    /// Score needed to finish a level
    pub fn level_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.level_up_step)
    }
}
