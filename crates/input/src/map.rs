//! Key mapping from terminal events to input symbols.

use crate::types::InputSymbol;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an input symbol.
pub fn map_key_event(key: KeyEvent) -> Option<InputSymbol> {
    if should_quit(key) {
        return Some(InputSymbol::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputSymbol::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputSymbol::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputSymbol::SoftDrop)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputSymbol::Rotate)
        }

        // Session
        KeyCode::Char('n') | KeyCode::Char('N') => Some(InputSymbol::NewPiece),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputSymbol::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputSymbol::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
