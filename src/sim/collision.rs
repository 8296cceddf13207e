//! Collision detection and obstacle spawning
//!
//! Everything is an axis-aligned box on a flat ground line, so the tests
//! are plain interval overlaps.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Periodic, probabilistic obstacle generator
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    /// Ticks since the last spawn attempt
    pub timer: u32,
    rng: Pcg32,
}

impl ObstacleSpawner {
    pub fn new(rng: Pcg32) -> Self {
        Self { timer: 0, rng }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }

    /// Advance one tick; returns the height of an obstacle to spawn, if any
    pub fn update(&mut self, level: u32, tuning: &Tuning) -> Option<f32> {
        self.timer += 1;
        // An attempt fires once the timer has passed the interval
        if self.timer <= tuning.obstacle_interval_ticks {
            return None;
        }
        self.timer = 0;

        if level < tuning.obstacle_min_level {
            return None;
        }
        if self.rng.random::<f32>() >= tuning.obstacle_spawn_chance {
            return None;
        }
        let (lo, hi) = (tuning.obstacle_min_height, tuning.obstacle_max_height);
        Some(if hi > lo { self.rng.random_range(lo..=hi) } else { lo })
    }
}

/// Knock the player back from every obstacle they touch
///
/// `player_box` is the player's box at the start of resolution. Each
/// obstacle hit is consumed so it cannot score twice.
pub fn resolve_obstacle_hits(state: &mut GameState, player_box: &Rect, events: &mut Vec<GameEvent>) {
    let mut hits: Vec<u32> = Vec::new();
    state.obstacles.retain(|obstacle: &Obstacle| {
        if player_box.intersects(&obstacle.bounds()) {
            hits.push(obstacle.id);
            false
        } else {
            true
        }
    });

    for id in hits {
        state.player.displace(-state.tuning.obstacle_knockback);
        state.score = state.score.saturating_sub(state.tuning.obstacle_penalty);
        log::debug!("Hit obstacle {} (score {})", id, state.score);
        events.push(GameEvent::ObstacleHit { id });
    }
}
