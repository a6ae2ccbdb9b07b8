//! Per-end tally: bowls delivered and shots scored in the end being played
//! (or in the scratch pair of an edit/insert).

use crate::types::{EndRecord, GameVariant, Side};

/// In-progress score for a single end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EndTally {
    up: u8,
    down: u8,
    bowls: u8,
    /// Side that has claimed this end. Taps for the other side are rejected
    /// until this clears.
    scorer: Option<Side>,
}

impl EndTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tally from a committed record.
    ///
    /// The bowl counter starts at zero; the scorer is taken from the record so
    /// the single-side rule still holds while editing.
    pub fn from_record(record: &EndRecord) -> Self {
        Self {
            up: record.up,
            down: record.down,
            bowls: 0,
            scorer: record.scorer(),
        }
    }

    /// Build a tally from explicit scores, or `None` if they break the rules.
    pub fn from_scores(up: u8, down: u8, variant: GameVariant) -> Option<Self> {
        let record = EndRecord::new(0, up, down);
        if !record.is_valid_for(variant) {
            return None;
        }
        Some(Self::from_record(&record))
    }

    pub fn up(&self) -> u8 {
        self.up
    }

    pub fn down(&self) -> u8 {
        self.down
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
        }
    }

    pub fn bowls(&self) -> u8 {
        self.bowls
    }

    pub fn scorer(&self) -> Option<Side> {
        self.scorer
    }

    pub fn is_empty(&self) -> bool {
        self.up == 0 && self.down == 0
    }

    fn score_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::Up => &mut self.up,
            Side::Down => &mut self.down,
        }
    }

    /// Register one bowl for `side`.
    ///
    /// Returns `false` (no change) if the other side already scored this end
    /// or all bowls of the end have been delivered. A bowl delivered after the
    /// side reached its per-end cap counts toward the bowl total only.
    pub fn register(&mut self, side: Side, variant: GameVariant) -> bool {
        if self.scorer.is_some_and(|s| s != side) {
            return false;
        }
        if self.bowls >= variant.max_bowls_per_end() {
            return false;
        }

        self.scorer = Some(side);
        self.bowls += 1;
        let cap = variant.max_score_per_side();
        let score = self.score_mut(side);
        if *score < cap {
            *score += 1;
        }
        true
    }

    /// Remove one bowl from `side` (long press).
    ///
    /// Returns `false` if that side has nothing to remove. Once both sides are
    /// back at zero the end is unclaimed and the bowl counter restarts.
    pub fn undo(&mut self, side: Side) -> bool {
        let score = self.score_mut(side);
        if *score == 0 {
            return false;
        }
        *score -= 1;
        self.bowls = self.bowls.saturating_sub(1);

        if self.score(side) == 0 && self.scorer == Some(side) {
            self.scorer = None;
        }
        if self.is_empty() {
            self.bowls = 0;
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_record(&self, end: u32) -> EndRecord {
        EndRecord::new(end, self.up, self.down)
    }
}
