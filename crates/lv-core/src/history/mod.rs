//! Linear undo/redo over filtered dataset snapshots

mod manager;

pub use manager::HistoryManager;

use crate::item::Snapshot;

/// A snapshot together with its position in the history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub ordinal: usize,
    pub snapshot: Snapshot,
}

/// Read-only view of the history used by navigation controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryContext {
    pub cursor: usize,
    pub len: usize,
}

impl HistoryContext {
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.len
    }

    /// Entry 0 is the unfiltered load; anything after it is a filtered view
    pub fn is_filtered(&self) -> bool {
        self.cursor > 0
    }
}
