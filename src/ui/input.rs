/// Key-press → turn-input translation.
///
/// The game is turn-based: we block on the next key event and map it to
/// one discrete action. Unknown keys are swallowed so stray presses never
/// burn a turn.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::domain::entity::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputAction {
    Move(Direction),
    /// Advance a turn without moving.
    Wait,
    Quit,
    /// Terminal resized; redraw without advancing the simulation.
    Redraw,
}

const KEYS_NORTH: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_SOUTH: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_EAST: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_WEST: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_WAIT: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Char('.')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Block until a key press that maps to an action.
pub fn read_action() -> io::Result<InputAction> {
    loop {
        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                {
                    return Ok(InputAction::Quit);
                }
                if let Some(action) = map_key(key.code) {
                    return Ok(action);
                }
            }
            Event::Resize(..) => return Ok(InputAction::Redraw),
            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Option<InputAction> {
    if KEYS_NORTH.contains(&code) {
        Some(InputAction::Move(Direction::North))
    } else if KEYS_SOUTH.contains(&code) {
        Some(InputAction::Move(Direction::South))
    } else if KEYS_EAST.contains(&code) {
        Some(InputAction::Move(Direction::East))
    } else if KEYS_WEST.contains(&code) {
        Some(InputAction::Move(Direction::West))
    } else if KEYS_WAIT.contains(&code) {
        Some(InputAction::Wait)
    } else if KEYS_QUIT.contains(&code) {
        Some(InputAction::Quit)
    } else {
        None
    }
}
