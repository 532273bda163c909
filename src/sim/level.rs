//! Level generation
//!
//! Levels are assembled column by column from a fixed set of 13-row
//! templates, picked by weighted random selection from a seeded RNG.
//! The opening stretch is kept flat so every run starts on open ground.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::state::{GameState, Grid};
use super::tile::Tile;
use crate::consts::{LEVEL_COLS, LEVEL_ROWS, SPAWN_COL, SPAWN_ROW};

/// Column templates, top row first. `-` empty, `#`/`=` wall, `P` pipe,
/// `?` surprise, `C` coin.
const COLUMN_TEMPLATES: [&str; 18] = [
    "----#--------",
    "----#-------=",
    "--------#---=",
    "-------------",
    "------------=",
    "-----------==",
    "----------===",
    "---------====",
    "--------=====",
    "--------?---=",
    "-------======",
    "----?---#---=",
    "----?---?---=",
    "--------C---=",
    "-------C----=",
    "----------PP=",
    "---------PPP=",
    "--------PPPP=",
];

/// Selection weights for the templates above
const COLUMN_WEIGHTS: [u32; 18] = [2, 14, 9, 15, 117, 6, 5, 5, 6, 7, 1, 4, 5, 15, 15, 6, 2, 14];

/// Template index of the flat, ground-only column used for the opening stretch
const FLAT_COLUMN: usize = 4;

fn write_column(grid: &mut Grid, col: usize, template: &str) {
    for (row, c) in template.chars().enumerate() {
        grid.set(row, col, Tile::from_char(c).unwrap_or(Tile::Empty));
    }
}

/// Pick a template index by cumulative-weight scan over one uniform draw.
fn pick_template(rng: &mut Pcg32) -> usize {
    let total: u32 = COLUMN_WEIGHTS.iter().sum();
    let r = rng.random::<f64>();
    let mut acc = 0.0;
    let mut idx = 0;
    for (k, w) in COLUMN_WEIGHTS.iter().enumerate() {
        acc += *w as f64;
        idx = k;
        if acc / total as f64 >= r {
            break;
        }
    }
    idx
}

/// Generate a fresh level and place the runner at its spawn cell.
///
/// The same seed always produces the same level.
pub fn generate_level(seed: u64) -> GameState {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut grid = Grid::empty(LEVEL_ROWS, LEVEL_COLS);

    // Flat opening stretch, twice the spawn column wide.
    for col in 0..2 * SPAWN_COL {
        write_column(&mut grid, col, COLUMN_TEMPLATES[FLAT_COLUMN]);
    }
    // The rest is drawn from the weighted template set.
    for col in 2 * SPAWN_COL..LEVEL_COLS {
        let idx = pick_template(&mut rng);
        write_column(&mut grid, col, COLUMN_TEMPLATES[idx]);
    }

    log::debug!("generated level with seed {seed}");
    GameState::new(grid, Body::new(SPAWN_ROW, SPAWN_COL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_match_level_height() {
        for template in COLUMN_TEMPLATES {
            assert_eq!(template.chars().count(), LEVEL_ROWS);
        }
        assert_eq!(COLUMN_TEMPLATES.len(), COLUMN_WEIGHTS.len());
    }

    #[test]
    fn test_opening_stretch_is_flat() {
        let state = generate_level(42);
        for col in 0..2 * SPAWN_COL {
            for row in 0..LEVEL_ROWS - 1 {
                if (row, col) == (SPAWN_ROW, SPAWN_COL) {
                    continue; // the runner marker
                }
                assert_eq!(state.grid.get(row, col), Tile::Empty);
            }
            assert_eq!(state.grid.get(LEVEL_ROWS - 1, col), Tile::Wall);
        }
    }

    #[test]
    fn test_runner_spawn() {
        let state = generate_level(42);
        assert_eq!(state.grid.get(SPAWN_ROW, SPAWN_COL), Tile::Runner);
        assert_eq!(state.body.row(), SPAWN_ROW);
        assert_eq!(state.body.col(), SPAWN_COL);
        assert_eq!(state.start_column(), SPAWN_COL as f64);
    }

    #[test]
    fn test_same_seed_same_level() {
        assert_eq!(generate_level(1234), generate_level(1234));
    }

    #[test]
    fn test_different_seeds_differ() {
        // Not guaranteed for every pair, but these two diverge.
        assert_ne!(generate_level(1), generate_level(2));
    }

    #[test]
    fn test_pick_template_in_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..1000 {
            assert!(pick_template(&mut rng) < COLUMN_TEMPLATES.len());
        }
    }
}
