//! Session: the frame loop around the simulation
//!
//! Owns the sim state together with its clock and score store. Each frame
//! the caller hands over the input drained from its event source and the
//! real elapsed time; the session applies the input, runs fixed substeps
//! and saves the high scores when a run ends.

use crate::consts::*;
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::platform::Clock;
use crate::sim::{GameEvent, GamePhase, GameState, InputEvent, SessionView, apply_input, step};
use crate::tuning::Tuning;

pub struct Session<C: Clock, S: ScoreStore> {
    state: GameState,
    clock: C,
    store: S,
    high_scores: HighScores,
    accumulator: f32,
    quit: bool,
}

impl<C: Clock, S: ScoreStore> Session<C, S> {
    /// Start a run; high scores are loaded once, here
    pub fn new(seed: u64, tuning: Tuning, clock: C, store: S) -> Self {
        let high_scores = HighScores::load(&store);
        let state = GameState::new(seed, tuning, clock.now());
        log::info!("Session started (seed {})", seed);
        Self {
            state,
            clock,
            store,
            high_scores,
            accumulator: 0.0,
            quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for embedders that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once the player asked to quit from a finished run
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Snapshot for rendering
    pub fn view(&self) -> SessionView {
        self.state.view(self.clock.now())
    }

    /// Run one frame of `frame_dt` real seconds
    ///
    /// Input is applied once, then as many fixed steps as the accumulator
    /// allows (at most `MAX_SUBSTEPS`).
    pub fn update(&mut self, input: &[InputEvent], frame_dt: f32) -> Vec<GameEvent> {
        let now = self.clock.now();
        let mut events = apply_input(&mut self.state, input, now);

        if frame_dt.is_finite() {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        } else {
            log::warn!("Ignoring bad frame delta {}", frame_dt);
        }
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(step(&mut self.state, now));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Leftover time must not burst out after a pause or a restart
        if self.state.phase != GamePhase::Playing {
            self.accumulator = 0.0;
        }

        self.finish_frame(&events);
        events
    }

    /// Apply input and run exactly one fixed step
    pub fn advance(&mut self, input: &[InputEvent]) -> Vec<GameEvent> {
        let now = self.clock.now();
        let mut events = apply_input(&mut self.state, input, now);
        events.extend(step(&mut self.state, now));
        self.finish_frame(&events);
        events
    }

    fn finish_frame(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Caught { score } | GameEvent::Escaped { score } => {
                    self.record_final_score(*score);
                }
                GameEvent::QuitRequested => self.quit = true,
                _ => {}
            }
        }
    }

    /// One save per run end
    fn record_final_score(&mut self, score: u32) {
        match self.high_scores.record(score) {
            Some(rank) => log::info!("New high score #{}: {}", rank, score),
            None => log::info!("Final score {} did not place", score),
        }
        self.high_scores.save(&mut self.store);
    }
}
