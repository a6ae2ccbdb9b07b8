//! Human-readable match summary.
//!
//! The summary is write-only: there is no reader for it.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::core::{MatchState, RunningRow};
use crate::types::{GameVariant, Side};

const STAMP_FORMAT: &str = "%H:%M %d-%m-%Y";
const FILE_STAMP_FORMAT: &str = "%H%M-%d-%m-%Y";

/// Everything needed to render a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub variant: GameVariant,
    pub rows: Vec<RunningRow>,
    pub up_total: u32,
    pub down_total: u32,
    pub winner: Option<Side>,
    pub started: NaiveDateTime,
    pub finished: NaiveDateTime,
}

impl MatchSummary {
    pub fn from_match(state: &MatchState, started: NaiveDateTime, finished: NaiveDateTime) -> Self {
        Self {
            variant: state.variant(),
            rows: state.history().running(),
            up_total: state.up_total(),
            down_total: state.down_total(),
            winner: state.winner(),
            started,
            finished,
        }
    }

    /// Generated file name: `B<HHmm-dd-MM-yyyy>.txt`, from the finish time.
    pub fn file_name(&self) -> String {
        format!("B{}.txt", self.finished.format(FILE_STAMP_FORMAT))
    }

    /// Whole minutes between start and finish (never negative).
    pub fn elapsed_minutes(&self) -> i64 {
        (self.finished - self.started).num_minutes().max(0)
    }

    pub fn result_line(&self) -> String {
        match self.winner {
            Some(Side::Up) => format!("Up wins {} - {}", self.up_total, self.down_total),
            Some(Side::Down) => format!("Down wins {} - {}", self.down_total, self.up_total),
            None => format!("Drawn {} - {}", self.up_total, self.down_total),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(128 + self.rows.len() * 40);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Bowls Scorer - {}", self.variant.as_str());
        let _ = writeln!(out, "Started: {}", self.started.format(STAMP_FORMAT));
        let _ = writeln!(out, "End  Up  Down  Up Total  Down Total");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:>3}  {:>2}  {:>4}  {:>8}  {:>10}",
                row.record.end, row.record.up, row.record.down, row.up_total, row.down_total
            );
        }
        let _ = writeln!(out, "Finished: {}", self.finished.format(STAMP_FORMAT));
        let _ = writeln!(out, "Elapsed: {} minutes", self.elapsed_minutes());
        let _ = writeln!(out, "Result: {}", self.result_line());
        out
    }
}
