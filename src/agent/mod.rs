//! Decision policies
//!
//! A policy is the one capability a player needs: given the authoritative
//! state and its remaining think-time, produce an action. The harness applies
//! the chosen action to the real state exactly once; policies never mutate it
//! (the search policy explores clones).
//!
//! The set of policies is closed and selected at construction; there is no
//! open-ended subclassing, and human input arrives through an explicit
//! channel rather than shared global state.

pub mod search;

pub use search::SearchPolicy;

use std::sync::mpsc::Receiver;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Action, GameState};

/// A decision strategy
pub enum Policy {
    /// Always does nothing (replay/placeholder player)
    Idle,
    /// Random pick between running right and jumping; never retreats
    Advance { rng: Pcg32 },
    /// Uniform pick over the three directional moves
    Random { rng: Pcg32 },
    /// Driven by an external input queue; does nothing when the queue is empty
    Human { inputs: Receiver<Action> },
    /// Deadline-bounded heuristic search
    Search(SearchPolicy),
}

impl Policy {
    /// Look up a non-interactive policy by name. Unknown names are rejected
    /// here, at construction, rather than patched up later.
    pub fn from_name(name: &str, seed: u64) -> Option<Self> {
        match name {
            "idle" => Some(Policy::Idle),
            "advance" => Some(Policy::Advance {
                rng: Pcg32::seed_from_u64(seed),
            }),
            "random" => Some(Policy::Random {
                rng: Pcg32::seed_from_u64(seed),
            }),
            "search" => Some(Policy::Search(SearchPolicy::new(seed))),
            _ => None,
        }
    }

    /// A human policy fed by the given channel
    pub fn human(inputs: Receiver<Action>) -> Self {
        Policy::Human { inputs }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Idle => "idle",
            Policy::Advance { .. } => "advance",
            Policy::Random { .. } => "random",
            Policy::Human { .. } => "human",
            Policy::Search(_) => "search",
        }
    }

    /// Whether this policy waits on a person (exempt from the time bank)
    pub fn is_interactive(&self) -> bool {
        matches!(self, Policy::Human { .. })
    }

    /// Choose the next action. `remaining` is the think-time budget left in
    /// the caller's bank; only the search policy paces itself by it.
    pub fn choose(&mut self, state: &GameState, remaining: Duration) -> Action {
        match self {
            Policy::Idle => Action::NoOp,
            Policy::Advance { rng } => {
                if rng.random_range(0..2) == 0 {
                    Action::MoveRight
                } else {
                    Action::Jump
                }
            }
            Policy::Random { rng } => {
                [Action::MoveRight, Action::Jump, Action::MoveLeft][rng.random_range(0..3)]
            }
            Policy::Human { inputs } => inputs.try_recv().unwrap_or(Action::NoOp),
            Policy::Search(agent) => agent.choose(state, remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generate_level;
    use std::sync::mpsc;

    #[test]
    fn test_from_name_rejects_unknown() {
        assert!(Policy::from_name("idle", 0).is_some());
        assert!(Policy::from_name("advance", 0).is_some());
        assert!(Policy::from_name("random", 0).is_some());
        assert!(Policy::from_name("search", 0).is_some());
        assert!(Policy::from_name("cheater", 0).is_none());
        assert!(Policy::from_name("human", 0).is_none());
    }

    #[test]
    fn test_idle_does_nothing() {
        let state = generate_level(1);
        let mut policy = Policy::from_name("idle", 0).unwrap();
        assert_eq!(policy.choose(&state, Duration::from_secs(1)), Action::NoOp);
    }

    #[test]
    fn test_advance_never_retreats() {
        let state = generate_level(1);
        let mut policy = Policy::from_name("advance", 3).unwrap();
        for _ in 0..100 {
            let action = policy.choose(&state, Duration::from_secs(1));
            assert!(matches!(action, Action::MoveRight | Action::Jump));
        }
    }

    #[test]
    fn test_random_is_directional() {
        let state = generate_level(1);
        let mut policy = Policy::from_name("random", 3).unwrap();
        for _ in 0..100 {
            let action = policy.choose(&state, Duration::from_secs(1));
            assert_ne!(action, Action::NoOp);
        }
    }

    #[test]
    fn test_human_drains_queue_then_idles() {
        let state = generate_level(1);
        let (tx, rx) = mpsc::channel();
        let mut policy = Policy::human(rx);
        assert!(policy.is_interactive());

        tx.send(Action::MoveRight).unwrap();
        tx.send(Action::Jump).unwrap();
        assert_eq!(
            policy.choose(&state, Duration::ZERO),
            Action::MoveRight
        );
        assert_eq!(policy.choose(&state, Duration::ZERO), Action::Jump);
        assert_eq!(policy.choose(&state, Duration::ZERO), Action::NoOp);

        drop(tx);
        assert_eq!(policy.choose(&state, Duration::ZERO), Action::NoOp);
    }

    #[test]
    fn test_seeded_policies_repeat() {
        let state = generate_level(1);
        let mut a = Policy::from_name("random", 77).unwrap();
        let mut b = Policy::from_name("random", 77).unwrap();
        for _ in 0..50 {
            assert_eq!(
                a.choose(&state, Duration::from_secs(1)),
                b.choose(&state, Duration::from_secs(1))
            );
        }
    }
}
