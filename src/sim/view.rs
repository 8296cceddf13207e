//! Read-only frame snapshots for the presentation layer

use serde::Serialize;

use super::state::{GamePhase, Obstacle, Player, Pursuer};

/// What the HUD needs to draw the typing panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeView {
    pub target: String,
    pub input: String,
    /// Seconds left on the current word
    pub time_remaining: f32,
    /// Remaining time as a fraction of the limit (for the countdown bar)
    pub time_fraction: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    /// Progress toward the next level (0-1)
    pub level_progress: f32,
    /// Gap to the pursuer, floored at 0
    pub distance: f32,
    pub player: Player,
    pub pursuer: Pursuer,
    pub obstacles: Vec<Obstacle>,
    pub challenge: ChallengeView,
}
