//! Fixed timestep simulation tick
//!
//! Core game loop: apply the frame's input, then advance the simulation one
//! step and settle collisions and win/loss.

use std::time::Duration;

use super::challenge::Submission;
use super::collision::resolve_obstacle_hits;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A discrete input occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A typed character
    Char(char),
    Backspace,
    /// Enter: check the typed word
    Submit,
    Jump,
    TogglePause,
    /// Start over (terminal phases only)
    Restart,
    /// Leave the game (terminal phases only)
    Quit,
}

/// Apply a frame's input events in order
pub fn apply_input(state: &mut GameState, input: &[InputEvent], now: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for &event in input {
        handle_event(state, event, now, &mut events);
    }
    events
}

fn handle_event(state: &mut GameState, event: InputEvent, now: Duration, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Playing => match event {
            InputEvent::Char(c) => {
                state.challenge.type_char(c, state.tuning.max_input_len);
            }
            InputEvent::Backspace => state.challenge.backspace(),
            InputEvent::Submit => submit_word(state, now, events),
            InputEvent::Jump => {
                if state.player.jump() {
                    events.push(GameEvent::Jumped);
                }
            }
            InputEvent::TogglePause => {
                state.phase = GamePhase::Paused;
                state.paused_at = Some(now);
                log::info!("Paused");
                events.push(GameEvent::Paused);
            }
            InputEvent::Restart | InputEvent::Quit => {}
        },
        GamePhase::Paused => {
            if event == InputEvent::TogglePause {
                // The countdown must not run while paused
                if let Some(paused_at) = state.paused_at.take() {
                    state.challenge.postpone(now.saturating_sub(paused_at));
                }
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
                events.push(GameEvent::Resumed);
            }
        }
        GamePhase::GameOver | GamePhase::Victory => match event {
            InputEvent::Restart => {
                state.reset(now);
                log::info!("Restarted (seed {})", state.seed);
                events.push(GameEvent::Restarted);
            }
            InputEvent::Quit => events.push(GameEvent::QuitRequested),
            _ => {}
        },
    }
}

fn submit_word(state: &mut GameState, now: Duration, events: &mut Vec<GameEvent>) {
    let word = state.challenge.target().to_string();
    let typed = state.challenge.input().to_string();

    match state.challenge.submit() {
        Submission::Match => {
            state.player.displace(state.tuning.match_player_advance);
            state.pursuer.displace(-state.tuning.match_pursuer_setback);

            let points = state.tuning.points_per_word.saturating_mul(state.level);
            state.score = state.score.saturating_add(points);
            log::debug!("Matched '{}' (+{}, score {})", word, points, state.score);
            events.push(GameEvent::WordMatched { word, points });

            if state.score >= state.tuning.level_threshold(state.level) {
                state.level += 1;
                log::info!("Level up: {}", state.level);
                events.push(GameEvent::LevelUp { level: state.level });
            }
            state.challenge.select_word(state.level, &state.tuning, now);
        }
        Submission::Mismatch => {
            state.pursuer.displace(state.tuning.miss_pursuer_advance);
            log::debug!("Missed '{}' (typed '{}')", word, typed);
            events.push(GameEvent::WordMissed { word, typed });
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn step(state: &mut GameState, now: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick if paused or finished
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // Entities
    state.player.update(SIM_DT);
    state.pursuer.update(state.level, &state.tuning);

    let scroll = state.tuning.scroll_speed(state.level);
    for obstacle in &mut state.obstacles {
        obstacle.update(scroll);
    }
    state.obstacles.retain(|o| !o.is_off_screen());

    if let Some(height) = state.spawner.update(state.level, &state.tuning) {
        let id = state.spawn_obstacle(height);
        log::debug!("Spawned obstacle {} (h={:.0})", id, height);
        events.push(GameEvent::ObstacleSpawned { id });
    }

    // Word deadline: a timeout is not a miss
    if state.challenge.is_expired(now) {
        let word = state.challenge.target().to_string();
        log::debug!("Word '{}' expired", word);
        state.challenge.select_word(state.level, &state.tuning, now);
        events.push(GameEvent::WordExpired { word });
    }

    // Collisions; the catch test uses the player's box from before knockback
    let player_box = state.player.bounds();
    resolve_obstacle_hits(state, &player_box, &mut events);

    if player_box.intersects(&state.pursuer.bounds()) {
        state.phase = GamePhase::Victory;
        log::info!("Victory! Final score {}", state.score);
        events.push(GameEvent::Caught { score: state.score });
    } else if state.pursuer.pos.x > SCREEN_WIDTH + state.tuning.escape_margin {
        state.phase = GamePhase::GameOver;
        log::info!("Game over, the runner escaped. Final score {}", state.score);
        events.push(GameEvent::Escaped { score: state.score });
    }

    events
}

/// Apply input, then advance one step
pub fn tick(state: &mut GameState, input: &[InputEvent], now: Duration) -> Vec<GameEvent> {
    let mut events = apply_input(state, input, now);
    events.extend(step(state, now));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default(), Duration::ZERO)
    }

    fn type_word(state: &mut GameState, word: &str, now: Duration) -> Vec<GameEvent> {
        let mut input: Vec<InputEvent> = word.chars().map(InputEvent::Char).collect();
        input.push(InputEvent::Submit);
        apply_input(state, &input, now)
    }

    fn type_target(state: &mut GameState, now: Duration) -> Vec<GameEvent> {
        let word = state.challenge.target().to_string();
        type_word(state, &word, now)
    }

    #[test]
    fn test_match_rewards_and_advances() {
        let mut state = new_state();
        let pursuer_x = state.pursuer.pos.x;
        let events = type_target(&mut state, Duration::ZERO);

        assert_eq!(state.score, 10);
        assert_eq!(state.player.pos.x, SCREEN_WIDTH - PLAYER_WIDTH);
        assert_eq!(state.pursuer.pos.x, pursuer_x - 300.0);
        assert_eq!(state.challenge.input(), "");
        assert!(matches!(events[0], GameEvent::WordMatched { points: 10, .. }));
    }

    #[test]
    fn test_mismatch_clears_and_helps_pursuer() {
        let mut state = new_state();
        let target = state.challenge.target().to_string();
        let pursuer_x = state.pursuer.pos.x;

        let events = type_word(&mut state, &format!("{target} "), Duration::ZERO);
        assert_eq!(state.score, 0);
        assert_eq!(state.challenge.input(), "");
        assert_eq!(state.challenge.target(), target);
        assert_eq!(state.pursuer.pos.x, pursuer_x + 20.0);
        assert!(matches!(events[0], GameEvent::WordMissed { .. }));
    }

    #[test]
    fn test_level_up_on_crossing_threshold() {
        let mut state = new_state();
        state.score = 90;
        let started = state.challenge.started_at();
        let events = type_target(&mut state, Duration::from_secs(2));

        assert_eq!(state.score, 100);
        assert_eq!(state.level, 2);
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        // Next word already picked, clock restarted, limit for level 2
        assert_eq!(state.challenge.started_at(), Duration::from_secs(2));
        assert_ne!(state.challenge.started_at(), started);
        assert_eq!(state.challenge.time_limit(), Duration::from_secs(14));
    }

    #[test]
    fn test_expiry_is_not_a_miss() {
        let mut state = new_state();
        let pursuer_x = state.pursuer.pos.x;
        state.challenge.type_char('q', 20);

        let events = step(&mut state, Duration::from_secs(15));
        assert!(events.iter().any(|e| matches!(e, GameEvent::WordExpired { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::WordMissed { .. })));
        assert_eq!(state.score, 0);
        assert_eq!(state.challenge.input(), "");
        assert_eq!(state.challenge.started_at(), Duration::from_secs(15));
        // Only the pursuer's own running moved it
        assert!((state.pursuer.pos.x - (pursuer_x + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_no_expiry_before_limit() {
        let mut state = new_state();
        let events = step(&mut state, Duration::from_millis(14_999));
        assert!(events.is_empty());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = new_state();
        tick(&mut state, &[InputEvent::TogglePause], Duration::from_secs(1));
        assert_eq!(state.phase, GamePhase::Paused);

        // Input other than the toggle is ignored while paused
        let before = state.clone();
        tick(&mut state, &[InputEvent::Char('a'), InputEvent::Jump], Duration::from_secs(2));
        assert_eq!(state.challenge.input(), "");
        assert!(!state.player.jumping);
        assert_eq!(state.player, before.player);
        assert_eq!(state.pursuer, before.pursuer);

        tick(&mut state, &[InputEvent::TogglePause], Duration::from_secs(5));
        assert_eq!(state.phase, GamePhase::Playing);
        // Four paused seconds are added back to the word
        assert_eq!(state.challenge.deadline(), Duration::from_secs(19));
    }

    #[test]
    fn test_jump_input() {
        let mut state = new_state();
        let events = apply_input(&mut state, &[InputEvent::Jump, InputEvent::Jump], Duration::ZERO);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert!(state.player.jumping);
    }

    #[test]
    fn test_catch_wins() {
        let mut state = new_state();
        state.pursuer.pos.x = state.player.pos.x + 10.0;
        let events = step(&mut state, Duration::ZERO);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(events.last(), Some(&GameEvent::Caught { score: 0 }));

        // Terminal: nothing moves any more
        let frozen = state.pursuer.clone();
        assert!(step(&mut state, Duration::ZERO).is_empty());
        assert_eq!(state.pursuer, frozen);
    }

    #[test]
    fn test_escape_loses() {
        let mut state = new_state();
        state.pursuer.pos.x = SCREEN_WIDTH + 5000.0 - 1.0;
        let events = step(&mut state, Duration::ZERO);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events.last(), Some(&GameEvent::Escaped { score: 0 }));
    }

    #[test]
    fn test_catch_beats_obstacle_but_penalty_applies() {
        let mut state = new_state();
        state.score = 30;
        let x = state.player.pos.x;
        state.pursuer.pos.x = x + 20.0;
        // After scrolling this tick the obstacle still overlaps both
        state.obstacles.push(Obstacle::new(99, x + 25.0, 30.0, 40.0));

        let events = step(&mut state, Duration::ZERO);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.score, 25);
        assert!(state.obstacles.is_empty());
        assert!(events.contains(&GameEvent::ObstacleHit { id: 99 }));
        assert_eq!(events.last(), Some(&GameEvent::Caught { score: 25 }));
    }

    #[test]
    fn test_restart_and_quit_only_when_finished() {
        let mut state = new_state();
        let events = apply_input(&mut state, &[InputEvent::Restart, InputEvent::Quit], Duration::ZERO);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.score = 50;
        let events = apply_input(&mut state, &[InputEvent::Restart], Duration::from_secs(9));
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);

        state.phase = GamePhase::Victory;
        let events = apply_input(&mut state, &[InputEvent::Quit], Duration::ZERO);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_obstacles_scroll_and_cull() {
        let mut state = new_state();
        state.level = 2;
        state.obstacles.push(Obstacle::new(1, 500.0, 30.0, 20.0));
        state.obstacles.push(Obstacle::new(2, -28.0, 30.0, 20.0));
        step(&mut state, Duration::ZERO);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 496.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning {
            obstacle_min_level: 1,
            ..Tuning::default()
        };
        let mut state1 = GameState::new(99999, tuning.clone(), Duration::ZERO);
        let mut state2 = GameState::new(99999, tuning, Duration::ZERO);

        for i in 0..2000u64 {
            let now = Duration::from_millis(i * 16);
            let input = if i % 150 == 0 { vec![InputEvent::Submit] } else { Vec::new() };
            tick(&mut state1, &input, now);
            tick(&mut state2, &input, now);
        }

        assert_eq!(state1.challenge.target(), state2.challenge.target());
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.pursuer, state2.pursuer);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.phase, state2.phase);
    }
}
