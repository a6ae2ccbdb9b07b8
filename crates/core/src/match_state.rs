//! Match state module - the end-scoring state machine
//!
//! This module owns the whole match: the end being played, the committed
//! history, the edit/insert scratch pair, and the mode the match is in.
//! Every operation is a synchronous state transition. Operations that are not
//! valid in the current mode are ignored and report `false`.

use crate::history::EndHistory;
use crate::snapshot::MatchSnapshot;
use crate::tally::EndTally;
use crate::types::{EndRecord, GameVariant, ScoreEvent, Side, WIN_SCORE};

/// What the match is currently doing.
///
/// Exactly one mode is active, so editing and inserting can never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for the first bowl of the next end
    Idle,
    /// At least one bowl registered in the current end
    ScoringEnd,
    /// Rewriting the scores of a committed end
    EditingEnd(u32),
    /// Inserting a new end at the given position
    AddingEnd(u32),
    /// A side reached the winning total (or the match was finished early)
    GameOver,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::ScoringEnd => "scoring",
            Mode::EditingEnd(_) => "editing",
            Mode::AddingEnd(_) => "adding",
            Mode::GameOver => "gameOver",
        }
    }

    /// True in the two modes where taps go to the live end.
    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Idle | Mode::ScoringEnd)
    }
}

/// Complete match state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchState {
    variant: GameVariant,
    /// Ordinal of the end being played (or about to be).
    end_number: u32,
    history: EndHistory,
    up_total: u32,
    down_total: u32,
    /// The live end.
    current: EndTally,
    /// Scores being edited or inserted.
    scratch: EndTally,
    mode: Mode,
}

impl MatchState {
    /// Create a fresh match for the given variant
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            end_number: 1,
            history: EndHistory::new(),
            up_total: 0,
            down_total: 0,
            current: EndTally::new(),
            scratch: EndTally::new(),
            mode: Mode::Idle,
        }
    }

    /// Rebuild a match from a committed history.
    ///
    /// Totals and the next end number are derived from `records`; the result
    /// is already in `GameOver` if the history contains a winning total.
    pub fn from_history(variant: GameVariant, records: impl IntoIterator<Item = EndRecord>) -> Self {
        let mut state = Self::new(variant);
        state.history = EndHistory::from_records(records);
        state.end_number = state.history.max_end().map_or(1, |m| m + 1);
        state.recompute_totals();
        state
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn end_number(&self) -> u32 {
        self.end_number
    }

    pub fn history(&self) -> &EndHistory {
        &self.history
    }

    pub fn up_total(&self) -> u32 {
        self.up_total
    }

    pub fn down_total(&self) -> u32 {
        self.down_total
    }

    pub fn total(&self, side: Side) -> u32 {
        match side {
            Side::Up => self.up_total,
            Side::Down => self.down_total,
        }
    }

    /// The live end's tally.
    pub fn in_progress(&self) -> &EndTally {
        &self.current
    }

    /// The edit/insert scratch tally.
    pub fn scratch(&self) -> &EndTally {
        &self.scratch
    }

    pub fn game_over(&self) -> bool {
        self.mode == Mode::GameOver
    }

    /// Winning side once the match is over.
    ///
    /// Up is checked first, so if both totals reach the winning score Up is
    /// declared the winner. After an early finish the higher total wins and a
    /// level score has no winner.
    pub fn winner(&self) -> Option<Side> {
        if self.mode != Mode::GameOver {
            return None;
        }
        if self.up_total >= WIN_SCORE {
            Some(Side::Up)
        } else if self.down_total >= WIN_SCORE {
            Some(Side::Down)
        } else if self.up_total > self.down_total {
            Some(Side::Up)
        } else if self.down_total > self.up_total {
            Some(Side::Down)
        } else {
            None
        }
    }

    /// Apply an engine event. Returns `false` if the event was rejected.
    pub fn apply(&mut self, event: ScoreEvent) -> bool {
        match event {
            ScoreEvent::Tap(side) => self.register_bowl(side),
            ScoreEvent::LongPress(side) => self.undo_bowl(side),
            ScoreEvent::CommitEnd => self.commit_end(),
            ScoreEvent::ConfirmDeadEnd => self.confirm_dead_end(),
            ScoreEvent::ResetEnd => self.reset_current_end(),
            ScoreEvent::StartEdit(end) => self.start_edit(end),
            ScoreEvent::SaveEdit => self.save_edit(),
            ScoreEvent::CancelEdit => self.cancel_edit(),
            ScoreEvent::PivotToAdd => self.pivot_to_add(),
            ScoreEvent::StartAdd(end) => self.start_add(end),
            ScoreEvent::SaveAdd => self.save_add(),
            ScoreEvent::CancelAdd => self.cancel_add(),
            ScoreEvent::Finish => self.finish(),
            ScoreEvent::NewGame => {
                self.reset_match();
                true
            }
        }
    }

    /// Value-style transition: consume the state and return the next one.
    pub fn transition(mut self, event: ScoreEvent) -> Self {
        self.apply(event);
        self
    }

    /// Register one bowl for `side`.
    ///
    /// In `Idle`/`ScoringEnd` this scores the live end; in `EditingEnd` and
    /// `AddingEnd` it scores the scratch pair. Rejected after game over, when
    /// the other side already scored this end, or when the end's bowls are
    /// used up.
    pub fn register_bowl(&mut self, side: Side) -> bool {
        match self.mode {
            Mode::Idle | Mode::ScoringEnd => {
                if !self.current.register(side, self.variant) {
                    return false;
                }
                self.mode = Mode::ScoringEnd;
                true
            }
            Mode::EditingEnd(_) | Mode::AddingEnd(_) => self.scratch.register(side, self.variant),
            Mode::GameOver => false,
        }
    }

    /// Remove one bowl from `side` (long press).
    ///
    /// The live end drops back to `Idle` once both sides are at zero.
    pub fn undo_bowl(&mut self, side: Side) -> bool {
        match self.mode {
            Mode::Idle | Mode::ScoringEnd => {
                if !self.current.undo(side) {
                    return false;
                }
                if self.current.is_empty() {
                    self.mode = Mode::Idle;
                }
                true
            }
            Mode::EditingEnd(_) | Mode::AddingEnd(_) => self.scratch.undo(side),
            Mode::GameOver => false,
        }
    }

    /// Commit the live end to history.
    ///
    /// Requires `ScoringEnd` with a non-zero score; a 0-0 end must go through
    /// [`confirm_dead_end`](Self::confirm_dead_end).
    pub fn commit_end(&mut self) -> bool {
        if self.mode != Mode::ScoringEnd || self.current.is_empty() {
            return false;
        }
        let record = self.current.to_record(self.end_number);
        self.commit_record(record);
        true
    }

    /// Commit a 0-0 end after the user confirmed it.
    ///
    /// Any partial score in the live end is discarded. The dead end is kept in
    /// history as `(n, 0, 0)` and consumes an end number.
    pub fn confirm_dead_end(&mut self) -> bool {
        if !self.mode.is_live() {
            return false;
        }
        self.current.clear();
        self.commit_record(EndRecord::new(self.end_number, 0, 0));
        true
    }

    fn commit_record(&mut self, record: EndRecord) {
        self.history.insert(record);
        self.end_number += 1;
        self.current.clear();
        self.mode = Mode::Idle;
        self.recompute_totals();
    }

    /// Discard the live end without touching history or totals.
    pub fn reset_current_end(&mut self) -> bool {
        if !self.mode.is_live() {
            return false;
        }
        self.current.clear();
        self.mode = Mode::Idle;
        true
    }

    /// Start editing committed end `end`.
    ///
    /// Only allowed between ends, so a half-played end is never lost.
    pub fn start_edit(&mut self, end: u32) -> bool {
        if self.mode != Mode::Idle {
            return false;
        }
        let Some(record) = self.history.get(end) else {
            return false;
        };
        self.scratch = EndTally::from_record(record);
        self.mode = Mode::EditingEnd(end);
        true
    }

    /// Overwrite the edited end with the scratch pair.
    ///
    /// A 0-0 scratch turns the end into a dead end.
    pub fn save_edit(&mut self) -> bool {
        let Mode::EditingEnd(end) = self.mode else {
            return false;
        };
        let record = self.scratch.to_record(end);
        if !record.is_valid_for(self.variant) || !self.history.replace(end, record.up, record.down) {
            return false;
        }
        self.scratch.clear();
        self.mode = Mode::Idle;
        self.recompute_totals();
        true
    }

    pub fn cancel_edit(&mut self) -> bool {
        if !matches!(self.mode, Mode::EditingEnd(_)) {
            return false;
        }
        self.scratch.clear();
        self.mode = Mode::Idle;
        true
    }

    /// Abandon the current edit and insert a new end in front of it.
    pub fn pivot_to_add(&mut self) -> bool {
        let Mode::EditingEnd(end) = self.mode else {
            return false;
        };
        self.scratch.clear();
        self.mode = Mode::Idle;
        self.start_add(end)
    }

    /// Open a slot at `before` for a new end.
    ///
    /// Every committed end `>= before` is renumbered up by one. Cancelling
    /// closes the slot again.
    pub fn start_add(&mut self, before: u32) -> bool {
        if self.mode != Mode::Idle || !self.history.contains(before) {
            return false;
        }
        self.history.open_gap(before);
        self.scratch.clear();
        self.mode = Mode::AddingEnd(before);
        true
    }

    /// Insert the scratch pair into the open slot.
    ///
    /// A 0-0 scratch is treated as a cancel.
    pub fn save_add(&mut self) -> bool {
        let Mode::AddingEnd(end) = self.mode else {
            return false;
        };
        if self.scratch.is_empty() {
            return self.cancel_add();
        }
        let record = self.scratch.to_record(end);
        if !record.within_caps(self.variant) {
            return false;
        }
        self.history.insert(record);
        self.end_number = self.history.max_end().map_or(1, |m| m + 1);
        self.scratch.clear();
        self.mode = Mode::Idle;
        self.recompute_totals();
        true
    }

    pub fn cancel_add(&mut self) -> bool {
        let Mode::AddingEnd(end) = self.mode else {
            return false;
        };
        self.history.close_gap(end);
        self.scratch.clear();
        self.mode = Mode::Idle;
        true
    }

    /// Set the scratch pair directly (edit/insert only).
    ///
    /// An edit keeps the single-side rule. An inserted end is entered after
    /// the fact, so only the per-side cap applies.
    pub fn set_scratch(&mut self, up: u8, down: u8) -> bool {
        let tally = match self.mode {
            Mode::EditingEnd(_) => EndTally::from_scores(up, down, self.variant),
            Mode::AddingEnd(_) => {
                let record = EndRecord::new(0, up, down);
                record
                    .within_caps(self.variant)
                    .then(|| EndTally::from_record(&record))
            }
            _ => None,
        };
        match tally {
            Some(tally) => {
                self.scratch = tally;
                true
            }
            None => false,
        }
    }

    /// End the match early. Only allowed between ends.
    pub fn finish(&mut self) -> bool {
        if self.mode != Mode::Idle {
            return false;
        }
        self.mode = Mode::GameOver;
        true
    }

    /// Start over with the same variant.
    pub fn reset_match(&mut self) {
        *self = Self::new(self.variant);
    }

    /// Recompute totals from history, then check for game over.
    fn recompute_totals(&mut self) {
        let (up, down) = self.history.totals();
        self.up_total = up;
        self.down_total = down;
        self.check_game_over();
    }

    fn check_game_over(&mut self) -> bool {
        if self.up_total >= WIN_SCORE || self.down_total >= WIN_SCORE {
            self.current.clear();
            self.scratch.clear();
            self.mode = Mode::GameOver;
            return true;
        }
        false
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        out.variant = self.variant;
        out.mode = self.mode;
        out.end_number = self.end_number;
        out.up_total = self.up_total;
        out.down_total = self.down_total;
        out.in_progress_up = self.current.up();
        out.in_progress_down = self.current.down();
        out.bowls = self.current.bowls();
        out.scratch_up = self.scratch.up();
        out.scratch_down = self.scratch.down();
        out.winner = self.winner();
        out.history.clear();
        out.history.extend_from_slice(self.history.as_slice());
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::new(self.variant);
        self.snapshot_into(&mut s);
        s
    }
}
