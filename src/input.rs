/// Key and mouse mapping from terminal events to player commands.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::entities::Direction;

/// What the front end should do with one terminal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Move(Direction),
    Restart,
    /// Left click at a terminal cell; restarts only when it lands on the
    /// win overlay.
    Click { column: u16, row: u16 },
}

/// Arrow keys and WASD move the player; anything else maps to nothing.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_restart_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter)
}

pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Key kind that moves the player: release when the terminal reports
/// release events, press otherwise.
pub fn key_trigger(reports_release: bool) -> KeyEventKind {
    if reports_release {
        KeyEventKind::Release
    } else {
        KeyEventKind::Press
    }
}

/// Decide what one terminal event means.  Quit always fires on press; moves
/// and restarts fire only on `trigger`.
pub fn action_for_event(event: &Event, trigger: KeyEventKind) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Press && should_quit(*key) {
                return Some(Action::Quit);
            }
            if key.kind != trigger {
                return None;
            }
            if is_restart_key(key.code) {
                return Some(Action::Restart);
            }
            direction_for_key(key.code).map(Action::Move)
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Action::Click {
            column: *column,
            row: *row,
        }),
        _ => None,
    }
}
