//! Typing Chase - a pursuit game where typing is the only way to run
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (kinematics, word challenges, collisions, lifecycle)
//! - `session`: Frame loop driver that owns the clock, the score store and the sim state
//! - `platform`: Clock abstraction
//! - `persistence`: High score store contract and backends
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Scripted typist for headless runs

pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::DataError;
pub use highscores::HighScores;
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Y coordinate of the ground line (screen space, y grows downward)
    pub const GROUND_Y: f32 = 580.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Launch velocity of a jump (px/s, negative is up)
    pub const JUMP_VELOCITY: f32 = -900.0;
    /// Downward acceleration while airborne (px/s²)
    pub const GRAVITY: f32 = 2880.0;
    /// Run cycle speed (radians/s)
    pub const PLAYER_ANIM_RATE: f32 = 18.0;

    /// Pursuer defaults
    pub const PURSUER_START_X: f32 = 700.0;
    pub const PURSUER_WIDTH: f32 = 50.0;
    pub const PURSUER_HEIGHT: f32 = 90.0;
    /// Run cycle advance per tick (radians)
    pub const PURSUER_ANIM_STEP: f32 = 0.4;
}
