/// Presentation layer: draws the engine snapshot after each turn.
///
/// Each game cell is two terminal columns wide so the 35×18 grid reads
/// roughly square. Turns are driven by key presses, so a full redraw per
/// turn is cheap: all commands are batched with `queue!` and flushed once.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::tile::TileKind;
use crate::sim::engine::Snapshot;
use crate::sim::grid::{HEIGHT, WIDTH};

const HUD_ROW: u16 = 0;
const MAP_ROW: u16 = 2;
const CELL_W: u16 = 2;

const BG: Color = Color::Rgb { r: 18, g: 14, b: 10 };

/// Glyph + color for a tile kind. Every glyph is exactly two columns.
fn tile_style(kind: TileKind) -> (&'static str, Color) {
    match kind {
        TileKind::Empty => ("  ", Color::Reset),
        TileKind::Dirt => ("░░", Color::Rgb { r: 134, g: 96, b: 56 }),
        TileKind::HardDirt => ("▒▒", Color::Rgb { r: 160, g: 120, b: 70 }),
        TileKind::Rock => ("██", Color::DarkGrey),
        TileKind::Copper => ("Cu", Color::Rgb { r: 214, g: 126, b: 66 }),
        TileKind::Silver => ("Ag", Color::Rgb { r: 200, g: 205, b: 215 }),
        TileKind::Uranium => ("U!", Color::Green),
        TileKind::Base => ("[]", Color::Cyan),
    }
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { writer: BufWriter::with_capacity(16384, io::stdout()) }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BG),
            Clear(ClearType::All),
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, snap: &Snapshot, message: &str) -> io::Result<()> {
        queue!(self.writer, SetBackgroundColor(BG), Clear(ClearType::All))?;

        self.draw_hud(snap)?;
        self.draw_grid(snap)?;
        self.draw_entities(snap)?;
        self.draw_footer(message)?;

        self.writer.flush()
    }

    fn draw_hud(&mut self, snap: &Snapshot) -> io::Result<()> {
        let hud = format!(
            " LEVEL {:<3} TURN {:<6} ENERGY {:>4}/{:<4} STRENGTH {:<3} SCORE {}",
            snap.level_number,
            snap.turn_number,
            snap.player.energy,
            snap.player.max_energy,
            snap.mining_strength,
            snap.score,
        );
        queue!(
            self.writer,
            MoveTo(0, HUD_ROW),
            SetForegroundColor(Color::White),
            Print(hud),
        )
    }

    fn draw_grid(&mut self, snap: &Snapshot) -> io::Result<()> {
        for y in 0..HEIGHT {
            queue!(self.writer, MoveTo(0, MAP_ROW + y as u16))?;
            for x in 0..WIDTH {
                let (glyph, fg) = tile_style(snap.grid.kind_at(x, y));
                queue!(self.writer, SetForegroundColor(fg), Print(glyph))?;
            }
        }
        Ok(())
    }

    fn draw_entities(&mut self, snap: &Snapshot) -> io::Result<()> {
        for mole in snap.moles.iter().flatten() {
            queue!(
                self.writer,
                MoveTo(mole.x as u16 * CELL_W, MAP_ROW + mole.y as u16),
                SetForegroundColor(Color::Red),
                Print("oo"),
            )?;
        }
        queue!(
            self.writer,
            MoveTo(snap.player.x as u16 * CELL_W, MAP_ROW + snap.player.y as u16),
            SetForegroundColor(Color::Yellow),
            Print("@ "),
        )
    }

    fn draw_footer(&mut self, message: &str) -> io::Result<()> {
        let msg_row = MAP_ROW + HEIGHT as u16 + 1;
        if !message.is_empty() {
            queue!(
                self.writer,
                MoveTo(0, msg_row),
                SetForegroundColor(Color::Yellow),
                Print(format!(" {message}")),
            )?;
        }
        queue!(
            self.writer,
            MoveTo(0, msg_row + 1),
            SetForegroundColor(Color::DarkGrey),
            Print(" arrows/wasd: move   space: wait   q: quit"),
        )
    }
}
