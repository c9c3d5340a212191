//! Hover/selection emphasis
//!
//! Emphasis is computed from identity sets each frame; views only apply the
//! resulting opacity and border.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::item::ItemIndex;
use crate::selection::SelectionState;

/// Visual emphasis of one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub opacity: f32,
    pub border: bool,
}

/// Opacity levels used by a view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisStyle {
    /// Opacity of items without emphasis
    pub default_opacity: f32,
    /// Opacity of emphasized items
    pub focus_opacity: f32,
}

impl Default for EmphasisStyle {
    fn default() -> Self {
        Self {
            default_opacity: 0.3,
            focus_opacity: 1.0,
        }
    }
}

impl EmphasisStyle {
    pub fn plain(&self) -> Emphasis {
        Emphasis {
            opacity: self.default_opacity,
            border: false,
        }
    }

    pub fn focused(&self) -> Emphasis {
        Emphasis {
            opacity: self.focus_opacity,
            border: true,
        }
    }
}

/// Emphasis of `index` in the scatter view.
///
/// Outside a filtered view, selected and hovered items are emphasized. Inside
/// a filtered view the filter already shows the selection, so only hovered
/// items are emphasized and `selected` is ignored.
pub fn emphasis(
    index: ItemIndex,
    selected: &AHashSet<ItemIndex>,
    hovered: &AHashSet<ItemIndex>,
    is_filtered: bool,
    style: &EmphasisStyle,
) -> Emphasis {
    let focused = if is_filtered {
        hovered.contains(&index)
    } else {
        selected.contains(&index) || hovered.contains(&index)
    };
    if focused {
        style.focused()
    } else {
        style.plain()
    }
}

/// The set of emphasized items, composed once per frame
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    focus: AHashSet<ItemIndex>,
}

impl HighlightSet {
    pub fn compose(selection: &SelectionState) -> Self {
        let focus = if selection.is_filtered {
            selection.hovered.clone()
        } else {
            selection
                .selected
                .union(&selection.hovered)
                .copied()
                .collect()
        };
        Self { focus }
    }

    pub fn emphasis(&self, index: ItemIndex, style: &EmphasisStyle) -> Emphasis {
        if self.focus.contains(&index) {
            style.focused()
        } else {
            style.plain()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.focus.is_empty()
    }

    pub fn len(&self) -> usize {
        self.focus.len()
    }
}

/// Opacity levels of the matrix view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellEmphasisStyle {
    pub default_opacity: f32,
    pub selected_opacity: f32,
    pub dimmed_opacity: f32,
}

impl Default for CellEmphasisStyle {
    fn default() -> Self {
        Self {
            default_opacity: 0.7,
            selected_opacity: 1.0,
            dimmed_opacity: 0.2,
        }
    }
}

/// Emphasis of `index` in the matrix view, driven by `selected` only
pub fn cell_emphasis(
    index: ItemIndex,
    selected: &AHashSet<ItemIndex>,
    style: &CellEmphasisStyle,
) -> Emphasis {
    let opacity = if selected.is_empty() {
        style.default_opacity
    } else if selected.contains(&index) {
        style.selected_opacity
    } else {
        style.dimmed_opacity
    };
    Emphasis {
        opacity,
        border: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> AHashSet<ItemIndex> {
        ids.iter().map(|&i| ItemIndex(i)).collect()
    }

    #[test]
    fn test_unfiltered_nothing_focused() {
        let style = EmphasisStyle::default();
        let e = emphasis(ItemIndex(1), &set(&[]), &set(&[]), false, &style);
        assert_eq!(e, style.plain());
    }

    #[test]
    fn test_unfiltered_union_of_selected_and_hovered() {
        let style = EmphasisStyle::default();
        let selected = set(&[1]);
        let hovered = set(&[2]);
        assert_eq!(emphasis(ItemIndex(1), &selected, &hovered, false, &style), style.focused());
        assert_eq!(emphasis(ItemIndex(2), &selected, &hovered, false, &style), style.focused());
        assert_eq!(emphasis(ItemIndex(3), &selected, &hovered, false, &style), style.plain());
    }

    #[test]
    fn test_filtered_only_hover_counts() {
        let style = EmphasisStyle::default();
        let hovered = set(&[2]);

        for selected in [set(&[]), set(&[1]), set(&[1, 3, 4])] {
            for id in 0..5 {
                let e = emphasis(ItemIndex(id), &selected, &hovered, true, &style);
                let expected = if id == 2 { style.focused() } else { style.plain() };
                assert_eq!(e, expected);
            }
        }
    }

    #[test]
    fn test_highlight_set_matches_function() {
        let style = EmphasisStyle::default();
        let mut state = SelectionState::new();
        state.commit(set(&[1, 2]), true);
        state.hover(ItemIndex(3));

        for filtered in [true, false] {
            state.is_filtered = filtered;
            let composed = HighlightSet::compose(&state);
            for id in 0..5 {
                let index = ItemIndex(id);
                assert_eq!(
                    composed.emphasis(index, &style),
                    emphasis(index, &state.selected, &state.hovered, filtered, &style)
                );
            }
        }
    }

    #[test]
    fn test_cell_emphasis() {
        let style = CellEmphasisStyle::default();
        assert_eq!(cell_emphasis(ItemIndex(0), &set(&[]), &style).opacity, 0.7);
        assert_eq!(cell_emphasis(ItemIndex(0), &set(&[0]), &style).opacity, 1.0);
        assert_eq!(cell_emphasis(ItemIndex(1), &set(&[0]), &style).opacity, 0.2);
    }
}
