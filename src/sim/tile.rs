//! Tile kinds and their character mapping
//!
//! One grid cell's terrain. Cells mutate in place as the runner consumes
//! them: a struck surprise block turns to wall, a touched coin to empty.

use serde::{Deserialize, Serialize};

/// One grid cell's terrain kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Pipe,
    /// Yields a bonus once when struck from below, then becomes [`Tile::Wall`]
    Surprise,
    /// Yields a bonus once on touch, then becomes [`Tile::Empty`]
    Coin,
    /// Marker for the runner's current cell
    Runner,
}

impl Tile {
    /// Whether the runner cannot pass through this tile.
    ///
    /// Pipes behave exactly like walls; an unstruck surprise block is solid too.
    #[inline]
    pub fn blocks(self) -> bool {
        matches!(self, Tile::Wall | Tile::Pipe | Tile::Surprise)
    }

    /// Whether this tile bounces the runner off when hit from below.
    ///
    /// Surprise blocks are handled separately (they convert and score).
    #[inline]
    pub fn is_ceiling(self) -> bool {
        matches!(self, Tile::Wall | Tile::Pipe)
    }

    /// Parse a level template character. `None` for unknown characters.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' | '-' => Some(Tile::Empty),
            '#' | '=' => Some(Tile::Wall),
            'P' => Some(Tile::Pipe),
            '?' => Some(Tile::Surprise),
            'C' => Some(Tile::Coin),
            'M' => Some(Tile::Runner),
            _ => None,
        }
    }

    /// Character used in textual dumps
    pub fn as_char(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Pipe => 'P',
            Tile::Surprise => '?',
            Tile::Coin => 'C',
            Tile::Runner => 'M',
        }
    }
}
