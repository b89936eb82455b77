use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use road_crossing::entities::Direction;
use road_crossing::input::*;

#[test]
fn arrows_and_wasd_map_to_directions() {
    assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
    assert_eq!(direction_for_key(KeyCode::Down), Some(Direction::Down));
    assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
    assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));

    assert_eq!(direction_for_key(KeyCode::Char('w')), Some(Direction::Up));
    assert_eq!(direction_for_key(KeyCode::Char('S')), Some(Direction::Down));
    assert_eq!(direction_for_key(KeyCode::Char('a')), Some(Direction::Left));
    assert_eq!(direction_for_key(KeyCode::Char('D')), Some(Direction::Right));
}

#[test]
fn unknown_keys_map_to_nothing() {
    assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    assert_eq!(direction_for_key(KeyCode::Tab), None);
    assert_eq!(direction_for_key(KeyCode::Char(' ')), None);
}

#[test]
fn restart_keys() {
    assert!(is_restart_key(KeyCode::Char('r')));
    assert!(is_restart_key(KeyCode::Char('R')));
    assert!(is_restart_key(KeyCode::Enter));
    assert!(!is_restart_key(KeyCode::Up));
}

#[test]
fn quit_keys() {
    assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
    assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    assert!(!should_quit(KeyEvent::from(KeyCode::Left)));
}

// ── action_for_event ──────────────────────────────────────────────────────────

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn trigger_is_press_unless_terminal_reports_release() {
    assert_eq!(key_trigger(false), KeyEventKind::Press);
    assert_eq!(key_trigger(true), KeyEventKind::Release);
}

#[test]
fn press_only_terminal_still_moves_the_player() {
    let trigger = key_trigger(false);
    let presses = [KeyCode::Up, KeyCode::Left, KeyCode::Down, KeyCode::Right];
    let actions: Vec<_> = presses
        .iter()
        .filter_map(|code| action_for_event(&key(*code, KeyEventKind::Press), trigger))
        .collect();
    assert_eq!(
        actions,
        vec![
            Action::Move(Direction::Up),
            Action::Move(Direction::Left),
            Action::Move(Direction::Down),
            Action::Move(Direction::Right),
        ]
    );
}

#[test]
fn press_mode_ignores_release_and_repeat() {
    let trigger = key_trigger(false);
    assert_eq!(action_for_event(&key(KeyCode::Up, KeyEventKind::Release), trigger), None);
    assert_eq!(action_for_event(&key(KeyCode::Up, KeyEventKind::Repeat), trigger), None);
    assert_eq!(
        action_for_event(&key(KeyCode::Char('r'), KeyEventKind::Release), trigger),
        None
    );
}

#[test]
fn release_mode_moves_on_release_only() {
    let trigger = key_trigger(true);
    assert_eq!(action_for_event(&key(KeyCode::Up, KeyEventKind::Press), trigger), None);
    assert_eq!(
        action_for_event(&key(KeyCode::Up, KeyEventKind::Release), trigger),
        Some(Action::Move(Direction::Up))
    );
    assert_eq!(
        action_for_event(&key(KeyCode::Enter, KeyEventKind::Release), trigger),
        Some(Action::Restart)
    );
}

#[test]
fn quit_fires_on_press_in_both_modes() {
    for reports_release in [false, true] {
        let trigger = key_trigger(reports_release);
        assert_eq!(
            action_for_event(&key(KeyCode::Char('q'), KeyEventKind::Press), trigger),
            Some(Action::Quit)
        );
    }
    assert_eq!(
        action_for_event(&key(KeyCode::Char('q'), KeyEventKind::Release), key_trigger(true)),
        None
    );
}

#[test]
fn restart_key_wins_over_movement_lookup() {
    let trigger = key_trigger(false);
    assert_eq!(
        action_for_event(&key(KeyCode::Char('R'), KeyEventKind::Press), trigger),
        Some(Action::Restart)
    );
    assert_eq!(action_for_event(&key(KeyCode::Char('x'), KeyEventKind::Press), trigger), None);
}

#[test]
fn left_mouse_down_is_a_click() {
    let trigger = key_trigger(false);
    assert_eq!(
        action_for_event(&mouse(MouseEventKind::Down(MouseButton::Left), 20, 7), trigger),
        Some(Action::Click { column: 20, row: 7 })
    );
    assert_eq!(
        action_for_event(&mouse(MouseEventKind::Down(MouseButton::Right), 20, 7), trigger),
        None
    );
    assert_eq!(
        action_for_event(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 7), trigger),
        None
    );
    assert_eq!(action_for_event(&Event::Resize(80, 24), trigger), None);
}
