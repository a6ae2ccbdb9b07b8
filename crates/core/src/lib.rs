//! Core scoring module - pure, deterministic, and testable
//!
//! This module contains the end-scoring rules and the match state machine.
//! It has **zero dependencies** on UI, files, or clocks, making it:
//!
//! - **Deterministic**: The same events always produce the same match
//! - **Testable**: Every rule is covered without a terminal harness
//! - **Portable**: Can run behind a terminal, a GUI, or a test
//!
//! # Module Structure
//!
//! - [`match_state`]: The match state machine (`Idle`, `ScoringEnd`,
//!   `EditingEnd`, `AddingEnd`, `GameOver`) and every operation on it
//! - [`tally`]: Bowls and shots for the end in progress, with the
//!   single-side-scores rule
//! - [`history`]: Committed ends in end order, totals, renumbering
//! - [`snapshot`]: Observable state for the display layer
//!
//! # Bowls Rules
//!
//! - **One scorer per end**: once a side has scored in an end, taps for the
//!   other side are ignored until the end is committed or reset
//! - **Caps**: a side scores at most 2 (singles) / 4 (doubles) per end, and at
//!   most 4 / 8 bowls are delivered per end
//! - **Dead ends**: a 0-0 end needs explicit confirmation and is recorded
//! - **Winning**: the first side to reach 21 wins
//!
//! # Example
//!
//! ```
//! use bowls_scorer_core::{MatchState, Mode};
//! use bowls_scorer_types::{EndRecord, GameVariant, Side};
//!
//! let mut game = MatchState::new(GameVariant::Singles);
//!
//! game.register_bowl(Side::Up);
//! game.register_bowl(Side::Up);
//! assert!(!game.register_bowl(Side::Down)); // Up already scored this end
//! game.commit_end();
//!
//! assert_eq!(game.history().as_slice(), &[EndRecord::new(1, 2, 0)]);
//! assert_eq!(game.up_total(), 2);
//! assert_eq!(game.end_number(), 2);
//! assert_eq!(game.mode(), Mode::Idle);
//! ```

pub mod history;
pub mod match_state;
pub mod snapshot;
pub mod tally;

pub use bowls_scorer_types as types;

// Re-export commonly used types for convenience
pub use history::{EndHistory, RunningRow};
pub use match_state::{MatchState, Mode};
pub use snapshot::MatchSnapshot;
pub use tally::EndTally;
