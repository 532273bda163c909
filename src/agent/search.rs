//! Deadline-bounded heuristic search
//!
//! Explores a small tree of hypothetical futures of the transition function
//! and picks the best-scoring first move. The search is an anytime
//! approximation: every recursive call polls a monotonic clock and falls back
//! to a leaf evaluation once the deadline has passed, so a shrinking time
//! bank degrades lookahead depth instead of causing a forfeit.
//!
//! Two hard overrides sit in front of the search: a stall escape for when the
//! heuristic plateaus against an obstacle, and an emergency move for when the
//! remaining bank is too small to think at all.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{step, Action, GameState};

/// Lookahead depth of the top-level decision
const MAX_SEARCH_DEPTH: u32 = 9;
/// Value of a branch in which the episode ends
const DEATH_PENALTY: f64 = -1_000_000.0;
/// Least think-time carved out of the bank per decision
const MIN_THINK_BUDGET: Duration = Duration::from_millis(5);
/// Bank level under which thinking is skipped entirely
const PANIC_FLOOR: Duration = Duration::from_millis(2);
/// Consecutive near-stationary decisions before the escape override fires
const STUCK_LIMIT: u32 = 15;
/// Column movement below this counts as standing still
const STALL_EPSILON: f64 = 0.5;

/// Search-driven decision policy.
///
/// The only state carried across decisions is the stall tracker; everything
/// else is recomputed from the authoritative state each call.
pub struct SearchPolicy {
    rng: Pcg32,
    last_column: f64,
    stuck_counter: u32,
}

impl SearchPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_column: 0.0,
            stuck_counter: 0,
        }
    }

    /// Choose the next action within `remaining` think-time.
    pub fn choose(&mut self, state: &GameState, remaining: Duration) -> Action {
        let deadline = Instant::now() + MIN_THINK_BUDGET.max(remaining / 100);

        // Stall tracking: count consecutive decisions without real movement.
        let column = state.body.pos.x;
        if (column - self.last_column).abs() < STALL_EPSILON {
            self.stuck_counter += 1;
        } else {
            self.stuck_counter = 0;
        }
        self.last_column = column;

        // Escape override: the search keeps walking into the same wall, so
        // stop consulting it and force a way out.
        if self.stuck_counter > STUCK_LIMIT {
            log::debug!("stall override after {} stationary decisions", self.stuck_counter);
            return if !state.airborne {
                Action::Jump
            } else {
                Action::MoveRight
            };
        }

        // Emergency override: almost out of bank, just keep running.
        if remaining < PANIC_FLOOR {
            return Action::MoveRight;
        }

        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for action in Action::ALL {
            let mut branch = state.clone();
            if step(&mut branch, action) {
                // Jitter breaks ties without reordering clear preferences.
                let value = simulate(&branch, MAX_SEARCH_DEPTH - 1, deadline)
                    + self.rng.random::<f64>() * 0.1;
                if value > best_value {
                    best_value = value;
                    best = Some(action);
                }
            }
        }
        // Every first move died: run right and hope.
        best.unwrap_or(Action::MoveRight)
    }
}

/// Bounded depth-first evaluation of a hypothetical state.
///
/// Past the deadline (or at depth zero) the state is scored as a leaf; no
/// recursion happens once the clock has run out. Inner nodes use a narrowed
/// two-move beam to bound branching.
fn simulate(state: &GameState, depth: u32, deadline: Instant) -> f64 {
    if depth == 0 || Instant::now() > deadline {
        return evaluate(state);
    }
    let mut best = f64::NEG_INFINITY;
    for action in [Action::MoveRight, Action::Jump] {
        let mut branch = state.clone();
        let value = if !step(&mut branch, action) {
            DEATH_PENALTY
        } else {
            simulate(&branch, depth - 1, deadline)
        };
        if value > best {
            best = value;
        }
    }
    best
}

/// Scalar goodness of a state; the only place preference is defined.
fn evaluate(state: &GameState) -> f64 {
    // Rightward position dominates.
    let mut value = state.body.pos.x * 10.0;
    // A grounded runner without horizontal speed is almost always stuck;
    // punish hard enough that any moving branch wins.
    if !state.airborne && state.body.vel.x.abs() < 1.0 {
        value -= 500.0;
    }
    // Reward rightward speed, penalize leftward.
    value += state.body.vel.x * 20.0;
    value += state.score * 0.5;
    // Deep rows sit next to the pits.
    if state.body.pos.y > 12.0 {
        value -= 200.0;
    }
    value
}
