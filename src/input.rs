/// Key-code mapping shared by both games.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::entities::Direction;

/// Arrow keys and WASD (either case).  Anything else is `None`, which the
/// game logic treats as "no input".
pub fn direction_for(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Some(Direction::Left),
            'w' => Some(Direction::Up),
            'd' => Some(Direction::Right),
            's' => Some(Direction::Down),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Enter / Space: close a modal or flip a card.
    Confirm,
    Restart,
    /// Back to the menu.
    Leave,
    /// Ctrl-C: exit the program.
    Quit,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Leave),
        ref code => direction_for(code).map(Command::Move),
    }
}
