//! Runner kinematics
//!
//! Continuous position/velocity pair with clamped integration. Matrix-style
//! axes throughout the simulation: `pos.y` is the row (down is positive),
//! `pos.x` is the column (right is positive).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, MAX_RUN_SPEED, MAX_VERTICAL_SPEED};

/// The simulated character's continuous position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Position: `x` = column, `y` = row
    pub pos: DVec2,
    /// Velocity, same axes
    pub vel: DVec2,
}

impl Body {
    /// Place a body at the given cell, already subject to the constant pull.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            pos: DVec2::new(col as f64, row as f64),
            vel: DVec2::new(0.0, GRAVITY),
        }
    }

    /// Apply one step of acceleration: add to velocity, clamp each axis
    /// independently to its maximum magnitude, then integrate position.
    pub fn update(&mut self, accel: DVec2) {
        self.vel += accel;
        self.vel = self.vel.clamp(
            DVec2::new(-MAX_RUN_SPEED, -MAX_VERTICAL_SPEED),
            DVec2::new(MAX_RUN_SPEED, MAX_VERTICAL_SPEED),
        );
        self.pos += self.vel;
    }

    /// Truncated row index. Positions are clamped non-negative by the
    /// transition before any indexing.
    #[inline]
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }

    /// Truncated column index
    #[inline]
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P:({} {}), V:({} {})",
            self.pos.y, self.pos.x, self.vel.y, self.vel.x
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_has_initial_pull() {
        let body = Body::new(11, 5);
        assert_eq!(body.pos, DVec2::new(5.0, 11.0));
        assert_eq!(body.vel, DVec2::new(0.0, GRAVITY));
    }

    #[test]
    fn test_update_integrates_after_clamping() {
        let mut body = Body::new(11, 5);
        body.update(DVec2::new(0.15, 0.05));
        assert_eq!(body.vel, DVec2::new(0.15, 0.1));
        assert_eq!(body.pos, DVec2::new(5.15, 11.1));
    }

    #[test]
    fn test_velocity_clamped_per_axis() {
        let mut body = Body::new(0, 0);
        body.update(DVec2::new(10.0, 10.0));
        assert_eq!(body.vel, DVec2::new(MAX_RUN_SPEED, MAX_VERTICAL_SPEED));

        let mut body = Body::new(5, 5);
        body.update(DVec2::new(-10.0, -10.0));
        assert_eq!(body.vel, DVec2::new(-MAX_RUN_SPEED, -MAX_VERTICAL_SPEED));
    }

    #[test]
    fn test_truncated_indices() {
        let mut body = Body::new(3, 7);
        body.pos = DVec2::new(7.99, 3.01);
        assert_eq!(body.row(), 3);
        assert_eq!(body.col(), 7);
    }
}
