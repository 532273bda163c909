//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per action, no wall-clock dependence
//! - Seeded RNG only (level generation)
//! - No rendering or platform dependencies
//!
//! The transition function's arithmetic is fixed: truncation for landing,
//! half-up rounding for ceilings, three-valued sign for friction. Scores are
//! only comparable between runs that perform these operations bit-for-bit.

pub mod body;
pub mod level;
pub mod state;
pub mod step;
pub mod tile;

pub use body::Body;
pub use level::generate_level;
pub use state::{GameState, Grid};
pub use step::{step, Action};
pub use tile::Tile;
