//! Cell selection algebra and the drag gesture

use std::collections::BTreeSet;

use super::{CellKey, GridLayout};
use crate::item::{CategoricalAttribute, Item};

/// The set of selected cells.
///
/// This is the canonical selection of the grid; the filtered items are always
/// derived from it with [`CellSelection::project`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSelection {
    cells: BTreeSet<CellKey>,
}

impl CellSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselect when `key` is the only selected cell, otherwise select exactly `key`
    pub fn toggle(&mut self, key: CellKey) {
        let only_this = self.cells.len() == 1 && self.cells.contains(&key);
        self.cells.clear();
        if !only_this {
            self.cells.insert(key);
        }
    }

    /// Replace the selection with the ordinal rectangle spanned by `start` and `end`.
    ///
    /// Returns `false` and leaves the selection alone when either key is not
    /// part of `layout`.
    pub fn select_range(&mut self, layout: &GridLayout, start: CellKey, end: CellKey) -> bool {
        match Self::cells_in_range(layout, start, end) {
            Some(cells) => {
                self.cells = cells;
                true
            }
            None => false,
        }
    }

    /// Every grid slot between the ordinal positions of `start` and `end`, inclusive
    pub fn cells_in_range(
        layout: &GridLayout,
        start: CellKey,
        end: CellKey,
    ) -> Option<BTreeSet<CellKey>> {
        let (c0, c1) = (layout.column_of(start.a)?, layout.column_of(end.a)?);
        let (r0, r1) = (layout.row_of(start.b)?, layout.row_of(end.b)?);

        let columns = &layout.columns[c0.min(c1)..=c0.max(c1)];
        let rows = &layout.rows[r0.min(r1)..=r0.max(r1)];

        Some(
            columns
                .iter()
                .flat_map(move |&a| rows.iter().map(move |&b| CellKey::new(a, b)))
                .collect(),
        )
    }

    /// Items of `full` that fall into a selected cell, in `full` order.
    ///
    /// With no cell selected this is the whole of `full`.
    pub fn project(
        &self,
        full: &[Item],
        attr_a: CategoricalAttribute,
        attr_b: CategoricalAttribute,
    ) -> Vec<Item> {
        if self.cells.is_empty() {
            return full.to_vec();
        }
        full.iter()
            .filter(|item| {
                CellKey::of(item, attr_a, attr_b).is_some_and(|key| self.cells.contains(&key))
            })
            .cloned()
            .collect()
    }

    /// Drop selected cells without a member in `full`.
    ///
    /// Returns how many cells were dropped.
    pub fn retain_occupied(
        &mut self,
        full: &[Item],
        attr_a: CategoricalAttribute,
        attr_b: CategoricalAttribute,
    ) -> usize {
        let occupied: BTreeSet<CellKey> = full
            .iter()
            .filter_map(|item| CellKey::of(item, attr_a, attr_b))
            .collect();
        let before = self.cells.len();
        self.cells.retain(|key| occupied.contains(key));
        before - self.cells.len()
    }

    pub fn contains(&self, key: CellKey) -> bool {
        self.cells.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellKey> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

/// Pointer gesture over the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Button held on `start`, no other cell entered yet
    Dragging { start: CellKey },
    /// Button held and a second cell was entered; release commits the range
    RangeSelected { start: CellKey, current: CellKey },
}

/// Cell selection plus the gesture that edits it
#[derive(Debug, Clone, Default)]
pub struct GridSelector {
    pub cells: CellSelection,
    pub drag: DragState,
}

impl GridSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, key: CellKey) {
        tracing::debug!("Grid pointer down on {:?}", key);
        self.drag = DragState::Dragging { start: key };
    }

    /// Pointer entered `key` while the button may be held.
    ///
    /// Returns whether the cell selection changed.
    pub fn pointer_enter(&mut self, key: CellKey, layout: &GridLayout) -> bool {
        let start = match self.drag {
            DragState::Idle => return false,
            DragState::Dragging { start } | DragState::RangeSelected { start, .. } => start,
        };
        if key == start {
            return false;
        }
        if !self.cells.select_range(layout, start, key) {
            return false;
        }
        self.drag = DragState::RangeSelected { start, current: key };
        true
    }

    /// Global pointer release; `over` is the cell under the pointer, if any.
    ///
    /// A release on the start cell without a drag is a click and toggles it.
    /// Returns whether the selection must be committed.
    pub fn pointer_up(&mut self, over: Option<CellKey>) -> bool {
        let drag = std::mem::take(&mut self.drag);
        match drag {
            DragState::Idle => false,
            DragState::Dragging { start } => {
                if over == Some(start) {
                    self.cells.toggle(start);
                    true
                } else {
                    false
                }
            }
            DragState::RangeSelected { .. } => true,
        }
    }

    /// Forget the selection and any gesture in progress
    pub fn reset(&mut self) {
        self.cells.clear();
        self.drag = DragState::Idle;
    }
}
