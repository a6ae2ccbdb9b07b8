use crate::match_state::Mode;
use crate::types::{EndRecord, GameVariant, Side};

/// Observable match state, as consumed by the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchSnapshot {
    pub variant: GameVariant,
    pub mode: Mode,
    pub end_number: u32,
    pub up_total: u32,
    pub down_total: u32,
    pub in_progress_up: u8,
    pub in_progress_down: u8,
    pub bowls: u8,
    pub scratch_up: u8,
    pub scratch_down: u8,
    pub winner: Option<Side>,
    pub history: Vec<EndRecord>,
}

impl MatchSnapshot {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            mode: Mode::Idle,
            end_number: 1,
            up_total: 0,
            down_total: 0,
            in_progress_up: 0,
            in_progress_down: 0,
            bowls: 0,
            scratch_up: 0,
            scratch_down: 0,
            winner: None,
            history: Vec::new(),
        }
    }

    pub fn total(&self, side: Side) -> u32 {
        match side {
            Side::Up => self.up_total,
            Side::Down => self.down_total,
        }
    }

    pub fn in_progress(&self, side: Side) -> u8 {
        match side {
            Side::Up => self.in_progress_up,
            Side::Down => self.in_progress_down,
        }
    }

    pub fn scratch(&self, side: Side) -> u8 {
        match side {
            Side::Up => self.scratch_up,
            Side::Down => self.scratch_down,
        }
    }

    /// Committed total plus the live end's partial score.
    pub fn projected_total(&self, side: Side) -> u32 {
        self.total(side) + u32::from(self.in_progress(side))
    }

    /// Number of the end shown on screen: the edited/inserted end while
    /// editing, otherwise the live end.
    pub fn focus_end(&self) -> u32 {
        match self.mode {
            Mode::EditingEnd(n) | Mode::AddingEnd(n) => n,
            _ => self.end_number,
        }
    }
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self::new(GameVariant::Singles)
    }
}
