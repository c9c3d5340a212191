//! History manager implementation

use std::sync::Arc;

use super::{HistoryContext, HistoryEntry};
use crate::item::{Item, Snapshot};
use crate::removal::RemovalSet;

/// Smallest history that still holds the initial load plus one filtered view
const MIN_LIMIT: usize = 2;

/// Stack of snapshots with a cursor.
///
/// Invariants: there is always at least one entry, `cursor < entries.len()`,
/// and entry 0 is the unfiltered initial load.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    limit: Option<usize>,
}

impl HistoryManager {
    /// Create a history holding only the initial load
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![HistoryEntry {
                ordinal: 0,
                snapshot: initial,
            }],
            cursor: 0,
            limit: None,
        }
    }

    /// Cap the number of entries; the oldest filtered entry is dropped first
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(MIN_LIMIT));
        self.enforce_limit();
        self
    }

    /// Append `snapshot` after the cursor, discarding forward history
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            ordinal: self.entries.len(),
            snapshot,
        });
        self.cursor = self.entries.len() - 1;
        self.enforce_limit();

        tracing::debug!(
            "History push: {} entries, cursor at {}",
            self.entries.len(),
            self.cursor
        );
    }

    /// Step back one entry. Returns whether the cursor moved.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns whether the cursor moved.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor].snapshot
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        self.context().can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.context().can_go_forward()
    }

    pub fn context(&self) -> HistoryContext {
        HistoryContext {
            cursor: self.cursor,
            len: self.entries.len(),
        }
    }

    /// Drop removed items from every entry so no navigation can bring them back
    pub fn prune(&mut self, removal: &RemovalSet) {
        for entry in &mut self.entries {
            if removal.touches(&entry.snapshot) {
                let kept: Vec<Item> = removal.filter(&entry.snapshot);
                entry.snapshot = Arc::from(kept);
            }
        }
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.entries.len() > limit {
            self.entries.remove(1);
            if self.cursor > 1 {
                self.cursor -= 1;
            }
        }
        for (ordinal, entry) in self.entries.iter_mut().enumerate() {
            entry.ordinal = ordinal;
        }
    }
}
