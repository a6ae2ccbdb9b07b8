//! Key mapping from terminal events to user intents.

use crate::types::{Intent, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to intents.
///
/// Plain side keys map to [`Intent::Tap`]; the shifted forms map straight to
/// [`Intent::LongPress`] for terminals where holding a key is awkward.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::ForceQuit);
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        // Side panels
        KeyCode::Up if shift => Some(Intent::LongPress(Side::Up)),
        KeyCode::Down if shift => Some(Intent::LongPress(Side::Down)),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Intent::Tap(Side::Up)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Intent::Tap(Side::Down)),
        KeyCode::Char('K') | KeyCode::Char('W') => Some(Intent::LongPress(Side::Up)),
        KeyCode::Char('J') | KeyCode::Char('S') => Some(Intent::LongPress(Side::Down)),

        // Dialog navigation
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::Back),

        // Actions
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::DeadEnd),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::ResetEnd),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Intent::History),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::Add),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Intent::Finish),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Intent::NewGame),

        // Variant selection
        KeyCode::Char('1') => Some(Intent::Singles),
        KeyCode::Char('2') => Some(Intent::Doubles),

        _ => None,
    }
}

/// Side panel a key taps, if any (unshifted keys only).
///
/// The press tracker uses this to tell taps from long presses.
pub fn tap_side(key: KeyEvent) -> Option<Side> {
    match handle_key_event(key) {
        Some(Intent::Tap(side)) => Some(side),
        _ => None,
    }
}

/// Check if key should quit immediately, bypassing the exit confirmation.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_side_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Intent::Tap(Side::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(Intent::Tap(Side::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('k'))),
            Some(Intent::Tap(Side::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(Intent::Tap(Side::Down))
        );
    }

    #[test]
    fn test_long_press_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(Intent::LongPress(Side::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(Intent::LongPress(Side::Down))
        );
        assert_eq!(tap_side(KeyEvent::from(KeyCode::Char('W'))), None);
        assert_eq!(tap_side(KeyEvent::from(KeyCode::Char('w'))), Some(Side::Up));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(Intent::Confirm)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(Intent::DeadEnd)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(Intent::History)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('2'))),
            Some(Intent::Doubles)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(Intent::Back)
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::ForceQuit)
        );
    }
}
