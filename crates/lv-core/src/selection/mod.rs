//! Selection state shared by the linked views

use ahash::AHashSet;

use crate::item::ItemIndex;

/// Selection, hover and brush sets plus the filtered flag.
///
/// `selected` and `is_filtered` change together on committed filtering
/// actions. `hovered` belongs to pointer enter/leave and never reaches the
/// history.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Items of the last committed filtering action
    pub selected: AHashSet<ItemIndex>,

    /// Items under the pointer
    pub hovered: AHashSet<ItemIndex>,

    /// Raw output of the last brush gesture, `None` when no brush is active
    pub brushed: Option<AHashSet<ItemIndex>>,

    /// Whether the active snapshot is a strict subset of the full dataset
    pub is_filtered: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed filtering action.
    ///
    /// An unfiltered commit (the whole dataset) leaves nothing selected.
    pub fn commit(&mut self, indices: AHashSet<ItemIndex>, is_filtered: bool) {
        self.selected = if is_filtered { indices } else { AHashSet::new() };
        self.is_filtered = is_filtered;
    }

    /// Reset after the history cursor moved
    pub fn reset_for_navigation(&mut self, cursor: usize) {
        self.selected.clear();
        self.hovered.clear();
        self.brushed = None;
        self.is_filtered = cursor > 0;
    }

    /// Hover exactly one item, replacing any previous hover
    pub fn hover(&mut self, index: ItemIndex) {
        self.hovered.clear();
        self.hovered.insert(index);
    }

    pub fn hover_clear(&mut self) {
        self.hovered.clear();
    }

    pub fn set_brushed(&mut self, brushed: Option<AHashSet<ItemIndex>>) {
        self.brushed = brushed;
    }

    /// Drop an index from every set
    pub fn forget(&mut self, index: ItemIndex) {
        self.selected.remove(&index);
        self.hovered.remove(&index);
        if let Some(brushed) = &mut self.brushed {
            brushed.remove(&index);
        }
    }

    /// Whether anything is selected or hovered
    pub fn has_focus(&self) -> bool {
        !self.selected.is_empty() || !self.hovered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> AHashSet<ItemIndex> {
        ids.iter().map(|&i| ItemIndex(i)).collect()
    }

    #[test]
    fn test_commit_sets_selected_and_filtered_together() {
        let mut state = SelectionState::new();
        state.commit(set(&[1, 2]), true);
        assert_eq!(state.selected, set(&[1, 2]));
        assert!(state.is_filtered);

        state.commit(set(&[0, 1, 2, 3]), false);
        assert!(state.selected.is_empty());
        assert!(!state.is_filtered);
    }

    #[test]
    fn test_navigation_reset() {
        let mut state = SelectionState::new();
        state.commit(set(&[1]), true);
        state.hover(ItemIndex(4));
        state.set_brushed(Some(set(&[1])));

        state.reset_for_navigation(0);
        assert!(state.selected.is_empty());
        assert!(state.hovered.is_empty());
        assert!(state.brushed.is_none());
        assert!(!state.is_filtered);

        state.reset_for_navigation(2);
        assert!(state.is_filtered);
    }

    #[test]
    fn test_hover_replaces_previous() {
        let mut state = SelectionState::new();
        state.hover(ItemIndex(1));
        state.hover(ItemIndex(2));
        assert_eq!(state.hovered, set(&[2]));

        state.hover_clear();
        assert!(state.hovered.is_empty());
    }
}
