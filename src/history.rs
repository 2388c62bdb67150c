//! Snapshot-based undo history.
//!
//! Every accepted placement pushes a full copy of the state it replaced.
//! Boards are at most a few hundred cells, so whole-board copies are cheap
//! and make restoration trivially exact.

use crate::board::{Captures, Color, Grid, Point};

/// The state of a board immediately before one placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub to_move: Color,
    pub captures: Captures,
    pub ko: Option<Point>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<Snapshot>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The last `n` snapshots, oldest first.
    pub fn recent(&self, n: usize) -> &[Snapshot] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
