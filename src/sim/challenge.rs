//! Word challenge: one target word, a typing buffer and a deadline
//!
//! Time is whatever the caller passes as `now` (see `platform::Clock`), so
//! the challenge never reads a clock itself.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use crate::tuning::Tuning;

/// Outcome of pressing Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Match,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct Challenge {
    target: String,
    input: String,
    started_at: Duration,
    time_limit: Duration,
    rng: Pcg32,
}

impl Challenge {
    /// Empty challenge; call `select_word` before use
    pub fn new(rng: Pcg32) -> Self {
        Self {
            target: String::new(),
            input: String::new(),
            started_at: Duration::ZERO,
            time_limit: Duration::ZERO,
            rng,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn deadline(&self) -> Duration {
        self.started_at + self.time_limit
    }

    /// Pick a fresh word for `level` and restart the countdown at `now`
    pub fn select_word(&mut self, level: u32, tuning: &Tuning, now: Duration) {
        let tier = tuning.tier(level);
        match tuning.lexicon.pool(tier).choose(&mut self.rng) {
            Some(word) => self.target.clone_from(word),
            None => log::warn!("Empty {} word pool, keeping '{}'", tier.as_str(), self.target),
        }
        self.input.clear();
        self.started_at = now;
        self.time_limit = tuning.word_time_limit(level);
        log::debug!(
            "New {} word '{}' ({:.1}s)",
            tier.as_str(),
            self.target,
            self.time_limit.as_secs_f32()
        );
    }

    /// Append a typed character; control characters and overflow are ignored
    pub fn type_char(&mut self, c: char, max_len: usize) -> bool {
        if c.is_control() || self.input.chars().count() >= max_len {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Compare the buffer against the target, exactly
    ///
    /// A mismatch clears the buffer; a match leaves it for the caller to
    /// replace with the next word.
    pub fn submit(&mut self) -> Submission {
        if self.input == self.target {
            Submission::Match
        } else {
            self.input.clear();
            Submission::Mismatch
        }
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.time_limit
    }

    pub fn time_remaining(&self, now: Duration) -> Duration {
        self.time_limit
            .saturating_sub(now.saturating_sub(self.started_at))
    }

    /// Remaining time as a fraction of the limit (1 = just started)
    pub fn time_fraction(&self, now: Duration) -> f32 {
        if self.time_limit.is_zero() {
            return 0.0;
        }
        self.time_remaining(now).as_secs_f32() / self.time_limit.as_secs_f32()
    }

    /// Move the start forward, e.g. by the length of a pause
    pub fn postpone(&mut self, by: Duration) {
        self.started_at += by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn challenge_with(target: &str) -> Challenge {
        let mut challenge = Challenge::new(Pcg32::seed_from_u64(1));
        challenge.select_word(1, &Tuning::default(), Duration::ZERO);
        challenge.target = target.to_string();
        challenge
    }

    fn type_str(challenge: &mut Challenge, text: &str) {
        for c in text.chars() {
            challenge.type_char(c, 20);
        }
    }

    #[test]
    fn test_exact_match() {
        let mut challenge = challenge_with("speed");
        type_str(&mut challenge, "speed");
        assert_eq!(challenge.submit(), Submission::Match);
    }

    #[test]
    fn test_trailing_space_is_mismatch() {
        let mut challenge = challenge_with("speed");
        type_str(&mut challenge, "speed ");
        assert_eq!(challenge.input(), "speed ");
        assert_eq!(challenge.submit(), Submission::Mismatch);
        assert_eq!(challenge.input(), "");
    }

    #[test]
    fn test_case_sensitive() {
        let mut challenge = challenge_with("speed");
        type_str(&mut challenge, "Speed");
        assert_eq!(challenge.submit(), Submission::Mismatch);
    }

    #[test]
    fn test_backspace_and_control_chars() {
        let mut challenge = challenge_with("run");
        type_str(&mut challenge, "rum");
        challenge.backspace();
        assert!(!challenge.type_char('\u{7}', 20));
        assert!(!challenge.type_char('\n', 20));
        challenge.type_char('n', 20);
        assert_eq!(challenge.input(), "run");

        let mut empty = challenge_with("run");
        empty.backspace();
        assert_eq!(empty.input(), "");
    }

    #[test]
    fn test_input_is_bounded() {
        let mut challenge = challenge_with("dash");
        type_str(&mut challenge, &"a".repeat(30));
        assert_eq!(challenge.input().chars().count(), 20);
        assert!(!challenge.type_char('b', 20));
    }

    #[test]
    fn test_words_come_from_active_tier() {
        let tuning = Tuning::default();
        let mut challenge = Challenge::new(Pcg32::seed_from_u64(99));
        for (level, pool) in [
            (1, &tuning.lexicon.easy),
            (6, &tuning.lexicon.medium),
            (12, &tuning.lexicon.hard),
        ] {
            for _ in 0..20 {
                challenge.select_word(level, &tuning, Duration::ZERO);
                assert!(pool.contains(&challenge.target().to_string()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_words() {
        let tuning = Tuning::default();
        let mut a = Challenge::new(Pcg32::seed_from_u64(5));
        let mut b = Challenge::new(Pcg32::seed_from_u64(5));
        for _ in 0..10 {
            a.select_word(1, &tuning, Duration::ZERO);
            b.select_word(1, &tuning, Duration::ZERO);
            assert_eq!(a.target(), b.target());
        }
    }

    #[test]
    fn test_deadline_and_expiry() {
        let mut challenge = Challenge::new(Pcg32::seed_from_u64(5));
        challenge.select_word(3, &Tuning::default(), Duration::from_secs(10));
        assert_eq!(challenge.time_limit(), Duration::from_secs(13));
        assert_eq!(challenge.deadline(), Duration::from_secs(23));

        assert!(!challenge.is_expired(Duration::from_secs(22)));
        assert_eq!(challenge.time_remaining(Duration::from_secs(22)), Duration::from_secs(1));
        assert!(challenge.is_expired(Duration::from_secs(23)));
        assert_eq!(challenge.time_remaining(Duration::from_secs(30)), Duration::ZERO);
        assert_eq!(challenge.time_fraction(Duration::from_secs(10)), 1.0);
    }

    #[test]
    fn test_postpone_shifts_deadline() {
        let mut challenge = Challenge::new(Pcg32::seed_from_u64(5));
        challenge.select_word(1, &Tuning::default(), Duration::ZERO);
        challenge.postpone(Duration::from_secs(4));
        assert_eq!(challenge.deadline(), Duration::from_secs(19));
        assert!(!challenge.is_expired(Duration::from_secs(18)));
    }
}
