//! End history - committed ends ordered by end number.
//!
//! Totals are always derived from the history (never kept as running deltas),
//! so edits and inserts can't drift them.

use crate::types::EndRecord;

/// Ordered list of committed ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EndHistory {
    records: Vec<EndRecord>,
}

/// A history row with cumulative totals up to and including it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningRow {
    pub record: EndRecord,
    pub up_total: u32,
    pub down_total: u32,
}

impl EndHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = EndRecord>) -> Self {
        let mut history = Self {
            records: records.into_iter().collect(),
        };
        history.sort();
        history
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[EndRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EndRecord> {
        self.records.iter()
    }

    pub fn get(&self, end: u32) -> Option<&EndRecord> {
        self.records.iter().find(|r| r.end == end)
    }

    pub fn contains(&self, end: u32) -> bool {
        self.get(end).is_some()
    }

    pub fn max_end(&self) -> Option<u32> {
        self.records.iter().map(|r| r.end).max()
    }

    /// Sum of each column: `(up, down)`.
    pub fn totals(&self) -> (u32, u32) {
        self.records.iter().fold((0, 0), |(up, down), r| {
            (up + u32::from(r.up), down + u32::from(r.down))
        })
    }

    /// Rows in end order with cumulative totals.
    pub fn running(&self) -> Vec<RunningRow> {
        let mut up_total = 0;
        let mut down_total = 0;
        self.records
            .iter()
            .map(|&record| {
                up_total += u32::from(record.up);
                down_total += u32::from(record.down);
                RunningRow {
                    record,
                    up_total,
                    down_total,
                }
            })
            .collect()
    }

    /// Append or insert a record, keeping end order.
    pub fn insert(&mut self, record: EndRecord) {
        self.records.push(record);
        self.sort();
    }

    /// Overwrite the scores of an existing end. Returns `false` if absent.
    pub fn replace(&mut self, end: u32, up: u8, down: u8) -> bool {
        match self.records.iter_mut().find(|r| r.end == end) {
            Some(r) => {
                r.up = up;
                r.down = down;
                true
            }
            None => false,
        }
    }

    /// Shift every end `>= at` up by one, leaving `at` free.
    pub fn open_gap(&mut self, at: u32) {
        for r in self.records.iter_mut().filter(|r| r.end >= at) {
            r.end += 1;
        }
    }

    /// Undo [`open_gap`](Self::open_gap): shift every end `> at` down by one.
    ///
    /// No-op if `at` is occupied.
    pub fn close_gap(&mut self, at: u32) {
        if self.contains(at) {
            return;
        }
        for r in self.records.iter_mut().filter(|r| r.end > at) {
            r.end -= 1;
        }
    }

    /// True if end numbers run 1..=len with no gaps or duplicates.
    pub fn is_dense(&self) -> bool {
        self.records
            .iter()
            .enumerate()
            .all(|(i, r)| r.end == i as u32 + 1)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn sort(&mut self) {
        self.records.sort_by_key(|r| r.end);
    }
}
