//! One-step transition function
//!
//! Advances the runner by one discrete step for a given action. The order of
//! operations and the rounding rules here are load-bearing: landing samples
//! with truncated indices while ceilings use half-up rounding, and friction
//! competes with input acceleration in the same update. Scores are only
//! comparable across implementations that reproduce this arithmetic exactly,
//! so none of it may be "cleaned up".

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::tile::Tile;
use crate::consts::*;
use crate::{round_half_up, sign};

/// One decision of a policy. Carries no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveRight,
    Jump,
    MoveLeft,
    /// Do nothing this step
    NoOp,
}

impl Action {
    /// Every action a policy may return
    pub const ALL: [Action; 4] = [
        Action::MoveRight,
        Action::Jump,
        Action::MoveLeft,
        Action::NoOp,
    ];

    /// Parse a single-key command, as fed to the human policy
    pub fn from_key(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Action::MoveRight),
            'U' => Some(Action::Jump),
            'L' => Some(Action::MoveLeft),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::MoveRight => "R",
            Action::Jump => "U",
            Action::MoveLeft => "L",
            Action::NoOp => "-",
        };
        write!(f, "{s}")
    }
}

/// Advance the state by one step. Returns `false` when the episode ends
/// (the runner fell past the bottom row or reached the far edge).
///
/// Never panics: out-of-range coordinates are clamped or snapped, and
/// termination is reported through the return value.
pub fn step(state: &mut GameState, action: Action) -> bool {
    // Lift the marker off the grid while the body moves.
    state
        .grid
        .set(state.body.row(), state.body.col(), Tile::Empty);

    let mut accel = DVec2::ZERO;
    match action {
        Action::MoveRight => accel.x = RUN_ACCEL,
        Action::Jump => {
            // Takeoff impulse only from the ground.
            if !state.airborne {
                accel.y = -JUMP_ACCEL;
                state.airborne = true;
            }
        }
        Action::MoveLeft => accel.x = -RUN_ACCEL,
        Action::NoOp => {}
    }

    // Gravity always pulls; ground friction opposes the current motion and
    // applies even when an input acceleration is present the same step.
    let old_sign = sign(state.body.vel.x);
    let friction = if state.airborne {
        0.0
    } else {
        old_sign * FRICTION
    };
    state
        .body
        .update(DVec2::new(accel.x - friction, accel.y + GRAVITY));

    // Friction must bring the runner to rest, not push it backwards.
    if old_sign != 0.0 && old_sign != sign(state.body.vel.x) {
        state.body.vel.x = 0.0;
    }

    if state.body.pos.x <= 0.0 {
        state.body.pos.x = 0.0;
    }
    if state.body.pos.y <= 0.0 {
        state.body.pos.y = 0.0;
    }

    // Fell into a pit or reached the far edge: the episode is over before
    // any collision resolution.
    let rows = state.grid.rows();
    let cols = state.grid.cols();
    if state.body.pos.y >= (rows - 1) as f64 || state.body.pos.x >= (cols - 1) as f64 {
        return false;
    }

    // Blocked ahead: snap back to the cell boundary.
    if state.grid.get(state.body.row(), state.body.col() + 1).blocks() {
        state.body.pos.x = state.body.pos.x.trunc();
        state.body.vel.x = 0.0;
    }
    // Overlapping a wall (possible after asymmetric snapping): push out right.
    if state.grid.get(state.body.row(), state.body.col()).blocks() {
        state.body.pos.x = state.body.pos.x.trunc() + 1.0;
        state.body.vel.x = 0.0;
    }

    // Landing: footprint sample one row below, half a cell ahead, truncated.
    let foot_col = (state.body.pos.x + 0.5) as usize;
    if state.grid.get(state.body.row() + 1, foot_col).blocks() {
        state.body.pos.y = state.body.pos.y.trunc();
        state.body.vel.y = 0.0;
        state.airborne = false;
    }

    // Ceiling: rounded-row sample, a different rule from landing on purpose.
    if state.body.pos.y >= 1.0 {
        let head_row = round_half_up(state.body.pos.y + state.body.vel.y - 0.5);
        let head_col = (state.body.pos.x + 0.5) as usize;
        if head_row >= 0.0
            && (head_row as usize) < rows
            && state.grid.get(head_row as usize, head_col).is_ceiling()
        {
            state.body.pos.y = state.body.pos.y.trunc();
            state.body.vel.y = GRAVITY;
        }
    }

    // Surprise strike: same sampling, re-evaluated against the updated body.
    // The block converts to wall and pays out exactly once.
    if state.body.pos.y >= 1.0 {
        let head_row = round_half_up(state.body.pos.y + state.body.vel.y - 0.5);
        let head_col = (state.body.pos.x + 0.5) as usize;
        if head_row >= 0.0
            && (head_row as usize) < rows
            && state.grid.get(head_row as usize, head_col) == Tile::Surprise
        {
            state.grid.set(head_row as usize, head_col, Tile::Wall);
            state.score += SURPRISE_SCORE;
            state.body.pos.y = state.body.pos.y.trunc();
            state.body.vel.y = 0.0;
        }
    }

    // Coin pickup at the body's own row, half a cell ahead.
    let coin_col = (state.body.pos.x + 0.5) as usize;
    if state.grid.get(state.body.row(), coin_col) == Tile::Coin {
        state.grid.set(state.body.row(), coin_col, Tile::Empty);
        state.score += COIN_SCORE;
    }

    state
        .grid
        .set(state.body.row(), state.body.col(), Tile::Runner);

    // Only new forward progress scores; moving backwards never does.
    let progress = state.body.pos.x - state.start_column();
    if state.max_distance < progress {
        state.score += DISTANCE_SCORE * (progress - state.max_distance);
        state.max_distance = progress;
    }

    true
}
