//! Shared types module - plain data structures and constants
//!
//! This module defines the fundamental types used throughout the scorer.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal view, the input mapper, and the match recorder.
//!
//! # Game Variants
//!
//! | Variant | Bowls per end | Max score per side per end |
//! |---------|---------------|----------------------------|
//! | Singles | 4 (2 players x 2 bowls) | 2 |
//! | Doubles | 8 (4 players x 2 bowls) | 4 |
//!
//! A match is won by the first side whose running total reaches
//! [`WIN_SCORE`] (21).
//!
//! # Input Timing
//!
//! Terminals have no long-press gesture. A key held past `LONG_PRESS_MS`
//! (detected from key-repeat or release events) counts as a long press,
//! which removes a bowl instead of adding one.
//!
//! # Examples
//!
//! ```
//! use bowls_scorer_types::{GameVariant, Side, ScoreEvent, WIN_SCORE};
//!
//! let variant = GameVariant::from_str("singles").unwrap();
//! assert_eq!(variant.max_bowls_per_end(), 4);
//! assert_eq!(variant.max_score_per_side(), 2);
//!
//! assert_eq!(Side::Up.opposite(), Side::Down);
//! assert_eq!(ScoreEvent::from_str("tapUp"), Some(ScoreEvent::Tap(Side::Up)));
//! assert_eq!(WIN_SCORE, 21);
//! ```

/// Running total that ends the match.
pub const WIN_SCORE: u32 = 21;

/// Bowls delivered per end in singles (2 players x 2 bowls).
pub const SINGLES_BOWLS_PER_END: u8 = 4;

/// Maximum shots one side can score in a singles end.
pub const SINGLES_MAX_SCORE: u8 = 2;

/// Bowls delivered per end in doubles (4 players x 2 bowls).
pub const DOUBLES_BOWLS_PER_END: u8 = 8;

/// Maximum shots one side can score in a doubles end.
pub const DOUBLES_MAX_SCORE: u8 = 4;

/// Hold duration that turns a tap into a long press.
pub const LONG_PRESS_MS: u32 = 350;

/// Quiet period after which a held key is treated as released.
///
/// Must exceed the typical terminal auto-repeat delay, otherwise a held key
/// is released before its first repeat arrives.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 700;

/// Input poll interval for the terminal loop.
pub const TICK_MS: u32 = 33;

/// One of the two competing parties.
///
/// The labels are positional: `Up` is the top panel, `Down` the bottom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
        }
    }

    /// Parse side from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bowls_scorer_types::Side;
    ///
    /// assert_eq!(Side::from_str("UP"), Some(Side::Up));
    /// assert_eq!(Side::from_str("down"), Some(Side::Down));
    /// assert_eq!(Side::from_str("left"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Side::Up),
            "down" => Some(Side::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Up => "Up",
            Side::Down => "Down",
        }
    }
}

/// Game variant, fixed when a match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameVariant {
    Singles,
    Doubles,
}

impl GameVariant {
    /// Total bowls (taps across both sides) allowed in one end.
    pub fn max_bowls_per_end(&self) -> u8 {
        match self {
            GameVariant::Singles => SINGLES_BOWLS_PER_END,
            GameVariant::Doubles => DOUBLES_BOWLS_PER_END,
        }
    }

    /// Maximum a single side can score in one end.
    pub fn max_score_per_side(&self) -> u8 {
        match self {
            GameVariant::Singles => SINGLES_MAX_SCORE,
            GameVariant::Doubles => DOUBLES_MAX_SCORE,
        }
    }

    /// Parse variant from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "singles" => Some(GameVariant::Singles),
            "doubles" => Some(GameVariant::Doubles),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Singles => "Singles",
            GameVariant::Doubles => "Doubles",
        }
    }
}

/// One committed end: `(end, up, down)`.
///
/// In bowls only one side scores in an end; a dead end scores neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndRecord {
    pub end: u32,
    pub up: u8,
    pub down: u8,
}

impl EndRecord {
    pub const fn new(end: u32, up: u8, down: u8) -> Self {
        Self { end, up, down }
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.up == 0 && self.down == 0
    }

    /// Side that scored this end, if any.
    pub fn scorer(&self) -> Option<Side> {
        if self.up > 0 {
            Some(Side::Up)
        } else if self.down > 0 {
            Some(Side::Down)
        } else {
            None
        }
    }

    /// Check the per-end scoring rules for `variant`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bowls_scorer_types::{EndRecord, GameVariant};
    ///
    /// assert!(EndRecord::new(1, 2, 0).is_valid_for(GameVariant::Singles));
    /// assert!(EndRecord::new(1, 0, 0).is_valid_for(GameVariant::Singles));
    /// assert!(!EndRecord::new(1, 3, 0).is_valid_for(GameVariant::Singles));
    /// assert!(!EndRecord::new(1, 1, 1).is_valid_for(GameVariant::Doubles));
    /// ```
    pub fn is_valid_for(&self, variant: GameVariant) -> bool {
        self.within_caps(variant) && (self.up == 0 || self.down == 0)
    }

    /// Both scores are within the variant's per-end cap.
    pub fn within_caps(&self, variant: GameVariant) -> bool {
        let cap = variant.max_score_per_side();
        self.up <= cap && self.down <= cap
    }
}

/// Engine input events.
///
/// These are produced by the application shell from user intents and applied
/// to the scoring engine. Events that are not valid in the current mode are
/// ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// Register one bowl for a side (a tap on its panel)
    Tap(Side),
    /// Remove one bowl from a side (a long press on its panel)
    LongPress(Side),
    /// Commit the current end
    CommitEnd,
    /// Commit a dead end (0-0) after confirmation
    ConfirmDeadEnd,
    /// Discard the in-progress end
    ResetEnd,
    /// Start editing a committed end
    StartEdit(u32),
    /// Save the edit scratch over the edited end
    SaveEdit,
    /// Abandon the edit
    CancelEdit,
    /// Abandon the edit and insert a new end before the edited one
    PivotToAdd,
    /// Start inserting a new end before the given end
    StartAdd(u32),
    /// Save the inserted end
    SaveAdd,
    /// Abandon the insert
    CancelAdd,
    /// End the match early
    Finish,
    /// Start a fresh match with the same variant
    NewGame,
}

impl ScoreEvent {
    /// Parse an argument-free event from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use bowls_scorer_types::{ScoreEvent, Side};
    ///
    /// assert_eq!(ScoreEvent::from_str("commitEnd"), Some(ScoreEvent::CommitEnd));
    /// assert_eq!(ScoreEvent::from_str("longPressDown"), Some(ScoreEvent::LongPress(Side::Down)));
    /// assert_eq!(ScoreEvent::from_str("startEdit"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tapup" => Some(ScoreEvent::Tap(Side::Up)),
            "tapdown" => Some(ScoreEvent::Tap(Side::Down)),
            "longpressup" => Some(ScoreEvent::LongPress(Side::Up)),
            "longpressdown" => Some(ScoreEvent::LongPress(Side::Down)),
            "commitend" => Some(ScoreEvent::CommitEnd),
            "confirmdeadend" => Some(ScoreEvent::ConfirmDeadEnd),
            "resetend" => Some(ScoreEvent::ResetEnd),
            "saveedit" => Some(ScoreEvent::SaveEdit),
            "canceledit" => Some(ScoreEvent::CancelEdit),
            "pivottoadd" => Some(ScoreEvent::PivotToAdd),
            "saveadd" => Some(ScoreEvent::SaveAdd),
            "canceladd" => Some(ScoreEvent::CancelAdd),
            "finish" => Some(ScoreEvent::Finish),
            "newgame" => Some(ScoreEvent::NewGame),
            _ => None,
        }
    }

    /// Convert to camelCase name (arguments are dropped)
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreEvent::Tap(Side::Up) => "tapUp",
            ScoreEvent::Tap(Side::Down) => "tapDown",
            ScoreEvent::LongPress(Side::Up) => "longPressUp",
            ScoreEvent::LongPress(Side::Down) => "longPressDown",
            ScoreEvent::CommitEnd => "commitEnd",
            ScoreEvent::ConfirmDeadEnd => "confirmDeadEnd",
            ScoreEvent::ResetEnd => "resetEnd",
            ScoreEvent::StartEdit(_) => "startEdit",
            ScoreEvent::SaveEdit => "saveEdit",
            ScoreEvent::CancelEdit => "cancelEdit",
            ScoreEvent::PivotToAdd => "pivotToAdd",
            ScoreEvent::StartAdd(_) => "startAdd",
            ScoreEvent::SaveAdd => "saveAdd",
            ScoreEvent::CancelAdd => "cancelAdd",
            ScoreEvent::Finish => "finish",
            ScoreEvent::NewGame => "newGame",
        }
    }
}

/// User intents produced by the input layer.
///
/// Intents are screen-agnostic; the application shell decides what each one
/// means on the current screen (e.g. `Confirm` commits an end on the scoring
/// screen but saves on the edit screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Tap(Side),
    LongPress(Side),
    /// Enter: commit / save / select
    Confirm,
    /// Esc: cancel dialog or request exit
    Back,
    DeadEnd,
    ResetEnd,
    History,
    /// Insert an end (history dialog, edit screen)
    Add,
    Finish,
    NewGame,
    Singles,
    Doubles,
    /// Quit immediately, bypassing the exit gate
    ForceQuit,
}
