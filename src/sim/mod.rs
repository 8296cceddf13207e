//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes in as an argument, never from the system clock
//! - No rendering or platform dependencies

pub mod challenge;
pub mod collision;
pub mod state;
pub mod tick;
pub mod view;

pub use challenge::{Challenge, Submission};
pub use collision::{ObstacleSpawner, Rect, resolve_obstacle_hits};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Pursuer};
pub use tick::{InputEvent, apply_input, step, tick};
pub use view::{ChallengeView, SessionView};
