//! Tap / long-press detection for terminal environments.
//!
//! Terminals report key repeats (and, with keyboard enhancement, releases) but
//! have no long-press gesture. A side key is held back until it resolves:
//!
//! - released (or gone quiet) before `long_press_ms`: [`Intent::Tap`]
//! - still held at `long_press_ms`: [`Intent::LongPress`], once per hold
//!
//! Without release events a held key is only seen through auto-repeat, so a
//! press that arrives sooner than `long_press_ms` after the previous one is a
//! second tap, and a later one is a repeat of a held key.

use arrayvec::ArrayVec;

use crate::types::{Intent, Side, KEY_RELEASE_TIMEOUT_MS, LONG_PRESS_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    held_ms: u32,
    quiet_ms: u32,
    /// Long press already emitted for this hold.
    fired: bool,
}

impl HeldKey {
    fn new() -> Self {
        Self {
            held_ms: 0,
            quiet_ms: 0,
            fired: false,
        }
    }
}

/// Tracks held side keys.
#[derive(Debug, Clone)]
pub struct PressTracker {
    held: [Option<HeldKey>; 2],
    long_press_ms: u32,
    key_release_timeout_ms: u32,
    /// Set once the terminal has delivered a release event.
    release_events: bool,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Up => 0,
        Side::Down => 1,
    }
}

fn side_of(slot: usize) -> Side {
    if slot == 0 {
        Side::Up
    } else {
        Side::Down
    }
}

impl PressTracker {
    pub fn new() -> Self {
        Self::with_config(LONG_PRESS_MS, KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_config(long_press_ms: u32, key_release_timeout_ms: u32) -> Self {
        Self {
            held: [None, None],
            long_press_ms,
            key_release_timeout_ms: key_release_timeout_ms.max(long_press_ms.saturating_add(1)),
            release_events: false,
        }
    }

    pub fn long_press_ms(&self) -> u32 {
        self.long_press_ms
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self, side: Side) -> bool {
        self.held[slot(side)].is_some()
    }

    /// Handle a press or auto-repeat of a side key.
    pub fn handle_key_press(&mut self, side: Side) -> Option<Intent> {
        let i = slot(side);
        match self.held[i].as_mut() {
            None => {
                self.held[i] = Some(HeldKey::new());
                None
            }
            Some(key) if key.held_ms < self.long_press_ms && !self.release_events => {
                // Too soon to be auto-repeat: the previous press was a tap.
                *key = HeldKey::new();
                Some(Intent::Tap(side))
            }
            Some(key) => {
                key.quiet_ms = 0;
                if !key.fired && key.held_ms >= self.long_press_ms {
                    key.fired = true;
                    return Some(Intent::LongPress(side));
                }
                None
            }
        }
    }

    /// Handle a key release (only delivered by enhanced terminals).
    pub fn handle_key_release(&mut self, side: Side) -> Option<Intent> {
        self.release_events = true;
        let key = self.held[slot(side)].take()?;
        if key.fired {
            None
        } else if key.held_ms >= self.long_press_ms {
            Some(Intent::LongPress(side))
        } else {
            Some(Intent::Tap(side))
        }
    }

    /// Advance hold timers and resolve keys that are due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, 2> {
        let mut intents = ArrayVec::<Intent, 2>::new();

        for i in 0..self.held.len() {
            let Some(key) = self.held[i].as_mut() else {
                continue;
            };
            key.held_ms = key.held_ms.saturating_add(elapsed_ms);
            key.quiet_ms = key.quiet_ms.saturating_add(elapsed_ms);
            let side = side_of(i);

            if self.release_events {
                // A real release will arrive; fire the long press on time.
                if !key.fired && key.held_ms >= self.long_press_ms {
                    key.fired = true;
                    intents.push(Intent::LongPress(side));
                }
                continue;
            }

            if key.quiet_ms >= self.key_release_timeout_ms {
                let fired = key.fired;
                self.held[i] = None;
                if !fired {
                    intents.push(Intent::Tap(side));
                }
            }
        }

        intents
    }

    /// Resolve every held key now: keys that have not long-pressed become
    /// taps. Used before a non-side key so earlier taps land first.
    pub fn flush(&mut self) -> ArrayVec<Intent, 2> {
        let mut intents = ArrayVec::<Intent, 2>::new();
        for i in 0..self.held.len() {
            if let Some(key) = self.held[i].take() {
                if !key.fired {
                    intents.push(Intent::Tap(side_of(i)));
                }
            }
        }
        intents
    }

    /// Drop all held keys without emitting anything.
    pub fn reset(&mut self) {
        self.held = [None, None];
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_resolves_after_quiet_timeout() {
        let mut pt = PressTracker::with_config(300, 600);
        assert_eq!(pt.handle_key_press(Side::Up), None);
        assert!(pt.update(599).is_empty());
        assert_eq!(pt.update(1).as_slice(), &[Intent::Tap(Side::Up)]);
        assert!(!pt.is_held(Side::Up));
    }

    #[test]
    fn test_quick_second_press_is_second_tap() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Down);
        pt.update(120);
        assert_eq!(pt.handle_key_press(Side::Down), Some(Intent::Tap(Side::Down)));
        assert_eq!(pt.update(600).as_slice(), &[Intent::Tap(Side::Down)]);
    }

    #[test]
    fn test_auto_repeat_becomes_single_long_press() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Up);
        pt.update(500);
        // First auto-repeat after the terminal's repeat delay.
        assert_eq!(pt.handle_key_press(Side::Up), Some(Intent::LongPress(Side::Up)));
        for _ in 0..10 {
            pt.update(30);
            assert_eq!(pt.handle_key_press(Side::Up), None);
        }
        // Key goes quiet: nothing more is emitted.
        assert!(pt.update(600).is_empty());
        assert!(!pt.is_held(Side::Up));
    }

    #[test]
    fn test_release_events_resolve_immediately() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Up);
        pt.update(50);
        assert_eq!(pt.handle_key_release(Side::Up), Some(Intent::Tap(Side::Up)));

        pt.handle_key_press(Side::Up);
        assert_eq!(pt.update(300).as_slice(), &[Intent::LongPress(Side::Up)]);
        assert_eq!(pt.handle_key_release(Side::Up), None);
    }

    #[test]
    fn test_sides_are_independent() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Up);
        pt.update(100);
        pt.handle_key_press(Side::Down);
        assert_eq!(pt.update(500).as_slice(), &[Intent::Tap(Side::Up)]);
        assert_eq!(pt.update(100).as_slice(), &[Intent::Tap(Side::Down)]);
    }

    #[test]
    fn test_release_timeout_is_clamped_above_long_press() {
        let pt = PressTracker::with_config(400, 100);
        assert!(pt.key_release_timeout_ms() > pt.long_press_ms());
    }

    #[test]
    fn test_extreme_long_press_does_not_overflow() {
        let pt = PressTracker::with_config(u32::MAX, u32::MAX);
        assert_eq!(pt.long_press_ms(), u32::MAX);
        assert_eq!(pt.key_release_timeout_ms(), u32::MAX);
    }

    #[test]
    fn test_flush_resolves_pending_taps() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Up);
        pt.update(100);
        pt.handle_key_press(Side::Down);
        assert_eq!(
            pt.flush().as_slice(),
            &[Intent::Tap(Side::Up), Intent::Tap(Side::Down)]
        );
        assert!(!pt.is_held(Side::Up));
        assert!(pt.update(10_000).is_empty());
    }

    #[test]
    fn test_flush_skips_fired_long_press() {
        let mut pt = PressTracker::with_config(300, 600);
        pt.handle_key_press(Side::Up);
        pt.update(400);
        assert_eq!(pt.handle_key_press(Side::Up), Some(Intent::LongPress(Side::Up)));
        assert!(pt.flush().is_empty());
        assert_eq!(pt.handle_key_release(Side::Up), None);
    }

    #[test]
    fn test_reset_drops_pending_presses() {
        let mut pt = PressTracker::new();
        pt.handle_key_press(Side::Up);
        pt.reset();
        assert!(pt.update(10_000).is_empty());
    }
}
