//! Simulation state: the tile grid and the runner it carries
//!
//! A `GameState` is the unit the search clones: deep copy of the grid, copy
//! of the body and scalars. Clones are fully independent, so a search branch
//! can consume coins or strike surprise blocks without affecting siblings or
//! the authoritative state.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::tile::Tile;

/// Fixed-size tile matrix, row 0 at the top, columns increasing rightward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// An all-empty grid
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Tile::Empty; rows * cols],
        }
    }

    /// Build a grid from rows of template characters.
    ///
    /// Rows are padded with empty tiles to the widest row; unknown characters
    /// are treated as empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::empty(height, width);
        for (i, row) in rows.iter().enumerate() {
            for (j, c) in row.chars().enumerate() {
                grid.set(i, j, Tile::from_char(c).unwrap_or(Tile::Empty));
            }
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row * self.cols + col] = tile;
    }
}

/// Complete simulation state (deterministic, cloneable per search branch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The level, mutated in place as tiles are consumed
    pub grid: Grid,
    /// The runner
    pub body: Body,
    /// Column the runner started at; progress is measured from here
    start_column: f64,
    /// Furthest column reached relative to the start, non-decreasing
    pub max_distance: f64,
    /// Accumulated score, non-decreasing within one playthrough
    pub score: f64,
    /// Whether the runner has left the ground (blocks further jump impulses)
    pub airborne: bool,
}

impl GameState {
    /// Create a state over the given grid and body placement.
    ///
    /// The runner marker is placed at the body's cell; the start column is
    /// fixed here and never changes.
    pub fn new(mut grid: Grid, body: Body) -> Self {
        grid.set(body.row(), body.col(), Tile::Runner);
        Self {
            grid,
            body,
            start_column: body.pos.x,
            max_distance: 0.0,
            score: 0.0,
            airborne: false,
        }
    }

    /// Column the runner started at
    #[inline]
    pub fn start_column(&self) -> f64 {
        self.start_column
    }
}

impl std::fmt::Display for GameState {
    /// Textual dump for logging and debugging only, not a machine format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                write!(f, "{}", self.grid.get(row, col).as_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "RUNNER: {}, SCORE: {}", self.body, self.score)
    }
}
