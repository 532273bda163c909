//! Episode harness
//!
//! Drives one playthrough: asks the policy for an action, charges the elapsed
//! think-time against the player's bank, and applies the action to the
//! authoritative state exactly once. The episode ends when the runner dies,
//! reaches the far edge, hits the step cap, or the bank runs dry.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::agent::Policy;
use crate::consts::MAX_STEPS;
use crate::sim::{step, GameState};

/// Final accounting of one episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    /// Steps actually simulated
    pub steps: u32,
    /// Final score
    pub score: f64,
    /// Furthest column reached relative to the start
    pub max_distance: f64,
    /// Whether the think-time bank ran out before the episode ended
    pub forfeited: bool,
}

/// One playthrough of one policy over one level
pub struct Episode {
    state: GameState,
    policy: Policy,
    time_bank: Duration,
    steps: u32,
    finished: bool,
    forfeited: bool,
}

impl Episode {
    pub fn new(state: GameState, policy: Policy, time_bank: Duration) -> Self {
        Self {
            state,
            policy,
            time_bank,
            steps: 0,
            finished: false,
            forfeited: false,
        }
    }

    /// The authoritative state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One decision/step cycle. Does nothing once the episode is finished.
    pub fn advance(&mut self) {
        if self.finished {
            return;
        }

        let start = Instant::now();
        let action = self.policy.choose(&self.state, self.time_bank);
        let elapsed = start.elapsed();

        // Interactive play is exempt from the bank; everyone else pays for
        // thinking and forfeits when the bank is gone.
        if !self.policy.is_interactive() {
            self.time_bank = self.time_bank.saturating_sub(elapsed);
            if self.time_bank.is_zero() {
                log::warn!("think-time bank exhausted after {} steps, forfeiting", self.steps);
                self.forfeited = true;
                self.finished = true;
                return;
            }
        }

        let continues = step(&mut self.state, action);
        self.steps += 1;
        log::trace!("step {}: {} score {}", self.steps, action, self.state.score);

        if !continues || self.steps >= MAX_STEPS {
            self.finished = true;
        }
    }

    /// Run the episode to completion
    pub fn run(&mut self) -> EpisodeSummary {
        while !self.finished {
            self.advance();
        }
        self.summary()
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            steps: self.steps,
            score: self.state.score,
            max_distance: self.state.max_distance,
            forfeited: self.forfeited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{generate_level, Action};
    use std::sync::mpsc;

    #[test]
    fn test_idle_runs_to_step_cap() {
        let mut episode = Episode::new(
            generate_level(5),
            Policy::from_name("idle", 0).unwrap(),
            Duration::from_secs(5),
        );
        let summary = episode.run();
        assert_eq!(summary.steps, MAX_STEPS);
        assert!(!summary.forfeited);
        // Never moved, never scored.
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.max_distance, 0.0);
    }

    #[test]
    fn test_empty_bank_forfeits_immediately() {
        let mut episode = Episode::new(
            generate_level(5),
            Policy::from_name("idle", 0).unwrap(),
            Duration::ZERO,
        );
        let summary = episode.run();
        assert!(summary.forfeited);
        assert_eq!(summary.steps, 0);
    }

    #[test]
    fn test_human_exempt_from_bank() {
        let (tx, rx) = mpsc::channel();
        for _ in 0..3 {
            tx.send(Action::MoveRight).unwrap();
        }
        let mut episode = Episode::new(generate_level(5), Policy::human(rx), Duration::ZERO);
        for _ in 0..5 {
            episode.advance();
        }
        let summary = episode.summary();
        assert!(!summary.forfeited);
        assert_eq!(summary.steps, 5);
        assert!(episode.state().body.pos.x > 5.0);
    }

    #[test]
    fn test_advance_policy_finishes() {
        let mut episode = Episode::new(
            generate_level(11),
            Policy::from_name("advance", 11).unwrap(),
            Duration::from_secs(5),
        );
        let summary = episode.run();
        assert!(episode.is_finished());
        assert!(summary.steps <= MAX_STEPS);
        assert!(summary.score >= 0.0);
    }

    #[test]
    fn test_finished_episode_stays_put() {
        let mut episode = Episode::new(
            generate_level(5),
            Policy::from_name("idle", 0).unwrap(),
            Duration::ZERO,
        );
        episode.run();
        let before = episode.summary();
        episode.advance();
        let after = episode.summary();
        assert_eq!(before.steps, after.steps);
    }
}
