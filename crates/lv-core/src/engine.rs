//! The coordinator linking the scatter view, the matrix view and the history
//!
//! Views never talk to each other. They forward pointer events here and read
//! back the current snapshot, the emphasis of each item and the matrix layout.

use std::sync::Arc;

use ahash::AHashSet;

use crate::brush::{BrushOutcome, BrushRegion, BrushSelector};
use crate::config::EngineConfig;
use crate::grid::{group_cells, CellKey, CellSelection, DragState, GridLayout, GridSelector};
use crate::highlight::{cell_emphasis, emphasis, Emphasis, HighlightSet};
use crate::history::{HistoryContext, HistoryManager};
use crate::item::{indices_of, Item, ItemIndex, Snapshot};
use crate::pack::{layout_matrix, MatrixLayout};
use crate::removal::RemovalSet;
use crate::selection::SelectionState;

/// Shared state of the linked views
#[derive(Debug)]
pub struct LinkedViews {
    config: EngineConfig,
    full: Snapshot,
    history: HistoryManager,
    selection: SelectionState,
    grid: GridSelector,
    removal: RemovalSet,
}

impl LinkedViews {
    pub fn new(items: Vec<Item>, config: EngineConfig) -> Self {
        let full: Snapshot = Arc::from(items);
        tracing::info!("Linked views initialised with {} items", full.len());
        Self {
            history: HistoryManager::new(full.clone()).with_limit(config.history_limit),
            full,
            config,
            selection: SelectionState::new(),
            grid: GridSelector::new(),
            removal: RemovalSet::new(),
        }
    }

    /// The snapshot both views display
    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    /// Every item not removed
    pub fn full(&self) -> &Snapshot {
        &self.full
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn cells(&self) -> &CellSelection {
        &self.grid.cells
    }

    pub fn drag_state(&self) -> DragState {
        self.grid.drag
    }

    pub fn is_filtered(&self) -> bool {
        self.selection.is_filtered
    }

    pub fn history(&self) -> HistoryContext {
        self.history.context()
    }

    pub fn removed(&self) -> &RemovalSet {
        &self.removal
    }

    /// Commit `items` as a new filtered snapshot.
    ///
    /// Items unknown to the full dataset are dropped; nothing happens when
    /// none remain. Returns whether the history moved.
    pub fn commit(&mut self, items: Vec<Item>) -> bool {
        self.commit_snapshot(items, true)
    }

    fn commit_snapshot(&mut self, items: Vec<Item>, is_filtered: bool) -> bool {
        let known = indices_of(self.full.iter());
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| known.contains(&item.index))
            .collect();
        if items.is_empty() {
            tracing::debug!("Ignoring empty commit");
            return false;
        }

        self.selection.commit(indices_of(&items), is_filtered);
        self.history.push(Arc::from(items));
        tracing::info!(
            "Committed {} of {} items (filtered: {}), history at {}/{}",
            self.current().len(),
            self.full.len(),
            is_filtered,
            self.history.cursor() + 1,
            self.history.len()
        );
        true
    }

    /// Screen mapping of the scatter view for a plot area of `width` x `height`
    pub fn scatter_selector(&self, width: f64, height: f64) -> BrushSelector {
        BrushSelector::new(
            self.current(),
            self.config.scatter.x_attribute,
            self.config.scatter.y_attribute,
            width,
            height,
        )
    }

    /// Apply the brush `region` (plot coordinates) at the end of a gesture
    pub fn brush(&mut self, region: Option<BrushRegion>, width: f64, height: f64) -> BrushOutcome {
        let outcome = self
            .scatter_selector(width, height)
            .select(self.current(), region);

        match &outcome {
            BrushOutcome::Cleared => {
                self.selection.set_brushed(None);
                self.selection.selected.clear();
            }
            BrushOutcome::Empty => {
                self.selection.set_brushed(Some(AHashSet::new()));
            }
            BrushOutcome::Selected(items) => {
                self.selection.set_brushed(Some(indices_of(items)));
                self.grid.reset();
                self.commit(items.clone());
            }
        }
        outcome
    }

    /// Commit the single item `index` of the current snapshot
    pub fn select_item(&mut self, index: ItemIndex) -> bool {
        let Some(item) = self.current().iter().find(|item| item.index == index).cloned() else {
            return false;
        };
        self.grid.reset();
        self.commit(vec![item])
    }

    pub fn cell_pointer_down(&mut self, key: CellKey) {
        self.grid.pointer_down(key);
    }

    /// Column and row ordinals of the grid shown for the current snapshot
    fn grid_ordinals(&self) -> GridLayout {
        let matrix = &self.config.matrix;
        let cells = group_cells(self.current(), matrix.column_attribute, matrix.row_attribute);
        GridLayout::ordinals(&cells)
    }

    /// Pointer entered `key`; extends a drag into a range selection
    pub fn cell_pointer_enter(&mut self, key: CellKey) -> bool {
        let ordinals = self.grid_ordinals();
        self.grid.pointer_enter(key, &ordinals)
    }

    /// Toggle `key` and commit the result
    pub fn cell_click(&mut self, key: CellKey) -> bool {
        self.grid.drag = DragState::Idle;
        self.grid.cells.toggle(key);
        self.commit_cells()
    }

    /// Global pointer release; `over` is the cell under the pointer, if any
    pub fn pointer_up(&mut self, over: Option<CellKey>) -> bool {
        if self.grid.pointer_up(over) {
            self.commit_cells()
        } else {
            false
        }
    }

    /// Commit the projection of the selected cells over the full dataset.
    ///
    /// No selected cell means the whole dataset, which is not a filtered view.
    fn commit_cells(&mut self) -> bool {
        let matrix = &self.config.matrix;
        let projected =
            self.grid
                .cells
                .project(&self.full, matrix.column_attribute, matrix.row_attribute);
        let is_filtered = !self.grid.cells.is_empty();
        tracing::debug!("{} cells selected", self.grid.cells.len());
        self.commit_snapshot(projected, is_filtered)
    }

    pub fn hover(&mut self, index: ItemIndex) {
        self.selection.hover(index);
    }

    pub fn hover_clear(&mut self) {
        self.selection.hover_clear();
    }

    pub fn go_back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.after_navigation();
        }
        moved
    }

    pub fn go_forward(&mut self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.after_navigation();
        }
        moved
    }

    fn after_navigation(&mut self) {
        self.selection.reset_for_navigation(self.history.cursor());
        self.grid.reset();
        tracing::info!(
            "History at {}/{}, showing {} items",
            self.history.cursor() + 1,
            self.history.len(),
            self.current().len()
        );
    }

    /// Exclude `index` for the rest of the session.
    ///
    /// The item disappears from the full dataset, every history entry and the
    /// selection. Selected cells left without members are deselected, and an
    /// active cell selection is re-projected and committed when its result
    /// changed. A view emptied by the removal falls back to the full dataset.
    /// Returns `false` for unknown or already removed items.
    pub fn remove(&mut self, index: ItemIndex) -> bool {
        if !self.removal.remove(index, &self.full) {
            return false;
        }

        self.full = Arc::from(self.removal.filter(&self.full));
        self.history.prune(&self.removal);
        self.selection.forget(index);
        tracing::info!(
            "Removed item {}, {} items left ({} removed)",
            index,
            self.full.len(),
            self.removal.len()
        );

        if !self.grid.cells.is_empty() {
            let matrix = &self.config.matrix;
            let (attr_a, attr_b) = (matrix.column_attribute, matrix.row_attribute);
            let dropped = self.grid.cells.retain_occupied(&self.full, attr_a, attr_b);
            if dropped > 0 {
                tracing::debug!("Deselected {} emptied cells", dropped);
            }
            let projected = self.grid.cells.project(&self.full, attr_a, attr_b);
            let unchanged = projected.len() == self.current().len()
                && projected
                    .iter()
                    .zip(self.current().iter())
                    .all(|(a, b)| a.index == b.index);
            if !unchanged {
                self.commit_cells();
            }
        } else if self.current().is_empty() && !self.full.is_empty() {
            self.commit_snapshot(self.full.to_vec(), false);
        }
        true
    }

    /// Scatter emphasis of `index` under the hover-only rule of filtered views
    pub fn scatter_emphasis(&self, index: ItemIndex) -> Emphasis {
        emphasis(
            index,
            &self.selection.selected,
            &self.selection.hovered,
            self.selection.is_filtered,
            &self.config.scatter.emphasis,
        )
    }

    /// Emphasized items of the scatter view, for drawing a whole frame
    pub fn scatter_highlight_set(&self) -> HighlightSet {
        HighlightSet::compose(&self.selection)
    }

    /// Matrix emphasis of `index`, driven by the selection only
    pub fn matrix_emphasis(&self, index: ItemIndex) -> Emphasis {
        cell_emphasis(index, &self.selection.selected, &self.config.matrix.emphasis)
    }

    /// Packed grid of the current snapshot for a view of `width` x `height`
    pub fn matrix_layout(&self, width: f64, height: f64) -> MatrixLayout {
        layout_matrix(self.current(), width, height, &self.config.matrix)
    }
}
