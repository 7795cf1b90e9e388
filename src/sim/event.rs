/// Events emitted during a turn.
/// The presentation layer consumes these for the HUD message line.

use crate::domain::tile::TileKind;

#[derive(Clone, Debug)]
pub enum GameEvent {
    /// The player cleared a tile by mining it.
    TileMined { x: usize, y: usize, kind: TileKind },
    /// Mining strength raised after clearing a URANIUM tile.
    StrengthBoosted,
    /// Energy restored to maximum while standing on the base.
    Refueled,
    /// A mole reached max fullness and detonated at (x, y).
    MoleExploded { x: usize, y: usize },
    /// An exploded mole's slot was cleared.
    MoleRemoved { slot: usize },
    /// All ore mined and the player returned to base; `level` is the new
    /// level number.
    LevelComplete { level: u32 },
}
