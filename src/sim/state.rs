//! Game state and core simulation types

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::challenge::Challenge;
use super::collision::{ObstacleSpawner, Rect};
use super::view::{ChallengeView, SessionView};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// The pursuer escaped
    GameOver,
    /// The player caught the pursuer
    Victory,
}

impl GamePhase {
    /// Victory and GameOver freeze the sim until a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Something that happened during a tick, for HUD/audio/logging consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    WordMatched { word: String, points: u32 },
    WordMissed { word: String, typed: String },
    WordExpired { word: String },
    LevelUp { level: u32 },
    Jumped,
    ObstacleSpawned { id: u32 },
    ObstacleHit { id: u32 },
    Paused,
    Resumed,
    /// Player reached the pursuer (entered Victory)
    Caught { score: u32 },
    /// Pursuer got away (entered GameOver)
    Escaped { score: u32 },
    Restarted,
    QuitRequested,
}

/// The player's runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/s, negative is up)
    pub vel_y: f32,
    pub jumping: bool,
    /// Run cycle phase (radians)
    pub anim: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, Self::ground_y()),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            jumping: false,
            anim: 0.0,
        }
    }
}

impl Player {
    /// Resting y of the player's top edge
    #[inline]
    pub fn ground_y() -> f32 {
        GROUND_Y - PLAYER_HEIGHT
    }

    /// Rightmost allowed x
    #[inline]
    fn max_x(&self) -> f32 {
        (SCREEN_WIDTH - self.size.x).max(0.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Advance run cycle and jump arc by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.anim += PLAYER_ANIM_RATE * dt;
        self.pos.x = self.pos.x.clamp(0.0, self.max_x());

        if self.jumping {
            self.pos.y += self.vel_y * dt;
            self.vel_y += GRAVITY * dt;
            if self.pos.y >= Self::ground_y() {
                self.pos.y = Self::ground_y();
                self.vel_y = 0.0;
                self.jumping = false;
            }
        }
    }

    /// Start a jump; returns false if already airborne
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.vel_y = JUMP_VELOCITY;
        true
    }

    /// Push the player horizontally (typing bonus, obstacle knockback)
    pub fn displace(&mut self, dx: f32) {
        self.pos.x = (self.pos.x + dx).clamp(0.0, self.max_x());
    }
}

/// The runner being chased
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Current speed (px/tick)
    pub speed: f32,
    /// Run cycle phase (radians)
    pub anim: f32,
}

impl Pursuer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PURSUER_START_X, GROUND_Y - PURSUER_HEIGHT),
            size: Vec2::new(PURSUER_WIDTH, PURSUER_HEIGHT),
            speed: tuning.pursuer_speed(1),
            anim: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Run one tick; the pursuer never stops and never turns back
    pub fn update(&mut self, level: u32, tuning: &Tuning) {
        self.anim += PURSUER_ANIM_STEP;
        self.speed = tuning.pursuer_speed(level);
        self.pos.x += self.speed;
    }

    /// Push the pursuer horizontally (word results)
    pub fn displace(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    /// Whether any part of the pursuer is on screen
    pub fn is_visible(&self) -> bool {
        self.pos.x + self.size.x >= 0.0 && self.pos.x <= SCREEN_WIDTH
    }
}

/// A ground obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            width,
            height,
        }
    }

    /// Top edge; obstacles sit on the ground
    #[inline]
    pub fn y(&self) -> f32 {
        GROUND_Y - self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::new(self.x, self.y()), Vec2::new(self.width, self.height))
    }

    /// Scroll left by `scroll_speed` px
    pub fn update(&mut self, scroll_speed: f32) {
        self.x -= scroll_speed;
    }

    /// True once the obstacle is fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Score (never negative)
    pub score: u32,
    /// Current level (starts at 1)
    pub level: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub player: Player,
    pub pursuer: Pursuer,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub challenge: Challenge,
    pub spawner: ObstacleSpawner,
    /// Clock reading when the current pause began
    pub paused_at: Option<Duration>,
    /// Next entity ID
    next_id: u32,
}

/// Stream selector for the obstacle RNG so it never mirrors the word RNG
const SPAWN_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

impl GameState {
    /// Create a new game with the given seed; the first word starts at `now`
    pub fn new(seed: u64, tuning: Tuning, now: Duration) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            pursuer: Pursuer::new(&tuning),
            challenge: Challenge::new(Pcg32::seed_from_u64(seed)),
            spawner: ObstacleSpawner::new(Pcg32::seed_from_u64(seed ^ SPAWN_STREAM)),
            tuning,
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            paused_at: None,
            next_id: 1,
        };
        state.challenge.select_word(state.level, &state.tuning, now);
        state
    }

    /// Restart: every owned entity back to its initial value
    ///
    /// RNG streams keep running so consecutive runs differ.
    pub fn reset(&mut self, now: Duration) {
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.player = Player::default();
        self.pursuer = Pursuer::new(&self.tuning);
        self.obstacles.clear();
        self.spawner.reset();
        self.paused_at = None;
        self.next_id = 1;
        self.challenge.select_word(self.level, &self.tuning, now);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an obstacle at the right screen edge
    pub fn spawn_obstacle(&mut self, height: f32) -> u32 {
        let id = self.next_entity_id();
        let width = self.tuning.obstacle_width;
        self.obstacles
            .push(Obstacle::new(id, SCREEN_WIDTH, width, height));
        id
    }

    /// Gap between pursuer and player (0 once the player is level or ahead)
    pub fn distance(&self) -> f32 {
        (self.pursuer.pos.x - self.player.pos.x).max(0.0)
    }

    /// Fraction of the current level's score target reached (0-1)
    pub fn level_progress(&self) -> f32 {
        let target = self.tuning.level_threshold(self.level).max(1);
        (self.score as f32 / target as f32).min(1.0)
    }

    /// Read-only snapshot for the presentation layer
    pub fn view(&self, now: Duration) -> SessionView {
        SessionView {
            phase: self.phase,
            score: self.score,
            level: self.level,
            level_progress: self.level_progress(),
            distance: self.distance(),
            player: self.player.clone(),
            pursuer: self.pursuer.clone(),
            obstacles: self.obstacles.clone(),
            challenge: ChallengeView {
                target: self.challenge.target().to_string(),
                input: self.challenge.input().to_string(),
                time_remaining: self.challenge_time_remaining(now).as_secs_f32(),
                time_fraction: self.challenge_time_fraction(now),
            },
        }
    }

    /// Frozen while paused: the countdown reads as of the pause
    fn challenge_now(&self, now: Duration) -> Duration {
        self.paused_at.unwrap_or(now)
    }

    fn challenge_time_remaining(&self, now: Duration) -> Duration {
        self.challenge.time_remaining(self.challenge_now(now))
    }

    fn challenge_time_fraction(&self, now: Duration) -> f32 {
        self.challenge.time_fraction(self.challenge_now(now))
    }
}
