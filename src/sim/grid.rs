/// The level grid: a fixed-size, dense, row-major array of tiles.
///
/// Dimensions never change during a run; a fresh Grid (with a fresh base
/// coordinate) is built by the generator at the start of every level.
/// All access is bounds-checked; out-of-range reads simply return None.

use crate::domain::tile::{Tile, TileKind};

/// Level width in tiles.
pub const WIDTH: usize = 35;
/// Level height in tiles.
pub const HEIGHT: usize = 18;

pub struct Grid {
    tiles: Vec<Tile>,
    /// First BASE cell found in row-major scan order, or (0, 0) if the
    /// generator produced no BASE at all. Later BASE cells are cosmetic.
    base: (usize, usize),
}

impl Grid {
    /// Build a grid from `WIDTH * HEIGHT` tiles in row-major order and
    /// record the canonical base coordinate.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), WIDTH * HEIGHT);
        let mut base = (0, 0);
        'scan: for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if tiles[y * WIDTH + x].kind == TileKind::Base {
                    base = (x, y);
                    break 'scan;
                }
            }
        }
        Grid { tiles, base }
    }

    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if Self::in_bounds(x, y) {
            Some(&self.tiles[y * WIDTH + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        if Self::in_bounds(x, y) {
            Some(&mut self.tiles[y * WIDTH + x])
        } else {
            None
        }
    }

    /// Kind at (x, y); out of bounds reads as Empty.
    /// Convenience for the renderer, which never leaves the grid anyway.
    pub fn kind_at(&self, x: usize, y: usize) -> TileKind {
        self.get(x, y).map(|t| t.kind).unwrap_or(TileKind::Empty)
    }

    /// The canonical base coordinate recorded at generation time.
    pub fn base(&self) -> (usize, usize) {
        self.base
    }

    /// True iff no COPPER, SILVER or URANIUM tile remains anywhere.
    pub fn all_ore_mined(&self) -> bool {
        !self.tiles.iter().any(|t| t.kind.is_ore())
    }
}
