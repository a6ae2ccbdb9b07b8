//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Intent`] and provides a press
//! tracker that recovers long presses from terminals (including terminals
//! without key-release events).

pub mod handler;
pub mod map;

pub use bowls_scorer_types as types;

pub use handler::PressTracker;
pub use map::{handle_key_event, should_quit, tap_side};
