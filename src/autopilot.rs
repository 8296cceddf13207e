//! Autopilot typist for headless and demo runs
//!
//! Reads the same snapshot a renderer would and answers with input events:
//! types the target at a steady pace, fumbles now and then, fixes typos
//! with backspace and hops over obstacles that get close.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GamePhase, InputEvent, SessionView};

/// Obstacles closer than this (px, leading edges) trigger a jump
const JUMP_LOOKAHEAD: f32 = 90.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Keystrokes per second
    pub keys_per_second: f32,
    /// Chance that a keystroke is a typo (0-1)
    pub typo_chance: f32,
    /// Seconds until the next keystroke
    cooldown: f32,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64, keys_per_second: f32, typo_chance: f32) -> Self {
        Self {
            keys_per_second: keys_per_second.max(0.1),
            typo_chance: typo_chance.clamp(0.0, 1.0),
            cooldown: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Decide this frame's input
    pub fn next_inputs(&mut self, view: &SessionView, dt: f32) -> Vec<InputEvent> {
        let mut input = Vec::new();
        if view.phase != GamePhase::Playing {
            return input;
        }

        let player = &view.player;
        let front = player.pos.x + player.size.x;
        let obstacle_close = view
            .obstacles
            .iter()
            .any(|o| o.x + o.width > player.pos.x && o.x - front < JUMP_LOOKAHEAD);
        if obstacle_close && !player.jumping {
            input.push(InputEvent::Jump);
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return input;
        }
        self.cooldown += 1.0 / self.keys_per_second;

        input.push(self.keystroke(&view.challenge.target, &view.challenge.input));
        input
    }

    fn keystroke(&mut self, target: &str, typed: &str) -> InputEvent {
        if !target.starts_with(typed) {
            return InputEvent::Backspace;
        }
        if typed == target {
            return InputEvent::Submit;
        }
        let next = target[typed.len()..].chars().next().unwrap_or(' ');
        if self.rng.random::<f32>() < self.typo_chance {
            InputEvent::Char(self.rng.random_range('a'..='z'))
        } else {
            InputEvent::Char(next)
        }
    }
}
