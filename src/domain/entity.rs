/// Entities: Player and Mole, plus the movement direction symbol.
/// Positions are always tile coordinates inside the grid.

/// Cardinal movement direction. `ALL` is ordered N, S, E, W; the mole
/// direction draw indexes into it, so the order is load-bearing for
/// seeded reproducibility.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// (dx, dy) for this direction. North is up: y decreases.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub energy: u32,
    pub max_energy: u32,
}

impl Player {
    /// A player starts with a full tank.
    pub fn new(x: usize, y: usize, max_energy: u32) -> Self {
        Player { x, y, energy: max_energy, max_energy }
    }
}

/// A mole tunnels at random and accumulates fullness from everything it
/// eats. At or over `max_fullness` it detonates and its slot is cleared.
#[derive(Clone, Debug)]
pub struct Mole {
    pub x: usize,
    pub y: usize,
    pub fullness: u32,
    pub max_fullness: u32,
}

impl Mole {
    pub fn new(x: usize, y: usize, max_fullness: u32) -> Self {
        Mole { x, y, fullness: 0, max_fullness }
    }

    /// Ready to detonate?
    pub fn is_full(&self) -> bool {
        self.fullness >= self.max_fullness
    }
}
