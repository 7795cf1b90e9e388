/// Tile kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    Empty,
    Dirt,
    HardDirt,
    Rock,     // Hardest minable tile
    Copper,   // Ore
    Silver,   // Ore
    Uranium,  // Ore; clearing it boosts mining strength
    Base,     // Refuel / level-completion anchor
}

impl TileKind {
    /// Can the player or a mole walk into this cell without mining?
    pub fn is_passable(self) -> bool {
        matches!(self, TileKind::Empty | TileKind::Base)
    }

    /// Is this an ore tile? Ore is what the win condition counts.
    pub fn is_ore(self) -> bool {
        matches!(self, TileKind::Copper | TileKind::Silver | TileKind::Uranium)
    }

    /// Starting durability for a freshly created tile of this kind.
    /// Harder kinds start higher. BASE carries a single point so that
    /// zero durability always means EMPTY.
    pub fn initial_durability(self) -> u32 {
        match self {
            TileKind::Empty => 0,
            TileKind::Base => 1,
            TileKind::Dirt => 2,
            TileKind::Copper => 3,
            TileKind::Silver => 4,
            TileKind::HardDirt => 5,
            TileKind::Uranium => 8,
            TileKind::Rock => 10,
        }
    }
}

impl Default for TileKind {
    fn default() -> Self {
        TileKind::Empty
    }
}

/// One grid cell: a kind plus its remaining durability.
/// Invariant: `durability == 0` ⇔ `kind == Empty`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub kind: TileKind,
    pub durability: u32,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Tile { kind, durability: kind.initial_durability() }
    }

    /// Mine this tile with the given strength.
    ///
    /// Durability drops by `strength`. If that clears the tile (strength
    /// meets or exceeds the remaining durability) the cell becomes Empty
    /// and the pre-mine kind is returned so callers can react to what was
    /// just cleared (URANIUM in particular). A partial hit, or mining an
    /// already-Empty cell, returns None.
    ///
    /// This is the single mutation point for all grid destruction:
    /// player digging, mole tunneling and explosions all go through here.
    pub fn mine(&mut self, strength: u32) -> Option<TileKind> {
        if self.kind == TileKind::Empty {
            return None;
        }
        if strength >= self.durability {
            let cleared = self.kind;
            self.kind = TileKind::Empty;
            self.durability = 0;
            Some(cleared)
        } else {
            self.durability -= strength;
            None
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new(TileKind::Empty)
    }
}
