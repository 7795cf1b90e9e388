/// Procedural level generation and mole placement.
///
/// Every cell is drawn independently from a fixed categorical distribution
/// over a uniform roll in 0..100. No spatial correlation or connectivity is
/// guaranteed; unreachable ore is an accepted outcome. Both routines take
/// the caller's RNG so a seeded run reproduces exact layouts.

use rand::Rng;

use crate::config::RulesConfig;
use crate::domain::entity::Mole;
use crate::domain::tile::{Tile, TileKind};
use super::grid::{Grid, HEIGHT, WIDTH};

/// Tile kind for a uniform roll in 0..100.
///
/// Bands: URANIUM 5%, SILVER 10%, COPPER 15%, ROCK 15%, HARD_DIRT 15%,
/// DIRT 20%, EMPTY 15%, BASE 5%.
fn kind_for_roll(n: u32) -> TileKind {
    match n {
        0..=4 => TileKind::Uranium,
        5..=14 => TileKind::Silver,
        15..=29 => TileKind::Copper,
        30..=44 => TileKind::Rock,
        45..=59 => TileKind::HardDirt,
        60..=79 => TileKind::Dirt,
        80..=94 => TileKind::Empty,
        _ => TileKind::Base,
    }
}

/// Generate a fresh level grid. Called once at game start and once per
/// level transition.
pub fn generate(rng: &mut impl Rng) -> Grid {
    let mut tiles = Vec::with_capacity(WIDTH * HEIGHT);
    for _ in 0..WIDTH * HEIGHT {
        let n = rng.random_range(0..100u32);
        tiles.push(Tile::new(kind_for_roll(n)));
    }
    Grid::from_tiles(tiles)
}

/// Spawn the mole set for a level: `level_number + 4` moles at uniform
/// random interior positions. The outer ring is off limits so a later
/// explosion's 3×3 read never leaves the grid.
pub fn spawn_moles(rng: &mut impl Rng, level_number: u32, rules: &RulesConfig) -> Vec<Option<Mole>> {
    let count = level_number as usize + rules.mole_base_count;
    let max_fullness = rules.mole_fullness_base + level_number * rules.mole_fullness_per_level;
    (0..count)
        .map(|_| {
            let x = rng.random_range(1..WIDTH - 1);
            let y = rng.random_range(1..HEIGHT - 1);
            Some(Mole::new(x, y, max_fullness))
        })
        .collect()
}
