//! Categorical small-multiples grid
//!
//! Items are bucketed by two categorical attributes. Columns follow the sorted
//! distinct values of the first attribute, rows those of the second.

mod selection;

pub use selection::{CellSelection, DragState, GridSelector};

use std::collections::{BTreeMap, BTreeSet};

use crate::item::{CategoricalAttribute, Item};

/// Identity of a grid cell: one value per categorical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Column value (e.g. bedrooms)
    pub a: i64,
    /// Row value (e.g. bathrooms)
    pub b: i64,
}

impl CellKey {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Key of `item`, or `None` when either attribute is missing
    pub fn of(item: &Item, attr_a: CategoricalAttribute, attr_b: CategoricalAttribute) -> Option<Self> {
        Some(Self::new(attr_a.value(item)?, attr_b.value(item)?))
    }
}

/// A cell with its member items
#[derive(Debug, Clone)]
pub struct GridCell {
    pub key: CellKey,
    pub items: Vec<Item>,
}

impl GridCell {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// Partition `items` into cells, ordered by key.
///
/// Items missing either attribute belong to no cell.
pub fn group_cells(
    items: &[Item],
    attr_a: CategoricalAttribute,
    attr_b: CategoricalAttribute,
) -> Vec<GridCell> {
    let mut grouped: BTreeMap<CellKey, Vec<Item>> = BTreeMap::new();
    let mut skipped = 0usize;
    for item in items {
        match CellKey::of(item, attr_a, attr_b) {
            Some(key) => grouped.entry(key).or_default().push(item.clone()),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("{} items without a grid cell", skipped);
    }
    grouped
        .into_iter()
        .map(|(key, items)| GridCell { key, items })
        .collect()
}

/// Column/row geometry of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Sorted distinct column values
    pub columns: Vec<i64>,
    /// Sorted distinct row values
    pub rows: Vec<i64>,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridLayout {
    /// Distinct column and row values of `cells`, without geometry
    pub fn ordinals(cells: &[GridCell]) -> Self {
        let columns: BTreeSet<i64> = cells.iter().map(|c| c.key.a).collect();
        let rows: BTreeSet<i64> = cells.iter().map(|c| c.key.b).collect();

        Self {
            columns: columns.into_iter().collect(),
            rows: rows.into_iter().collect(),
            cell_width: 0.0,
            cell_height: 0.0,
        }
    }

    /// Split `width` x `height` evenly between the distinct values of `cells`
    pub fn compute(cells: &[GridCell], width: f64, height: f64) -> Self {
        let mut layout = Self::ordinals(cells);
        if !layout.columns.is_empty() {
            layout.cell_width = width / layout.columns.len() as f64;
        }
        if !layout.rows.is_empty() {
            layout.cell_height = height / layout.rows.len() as f64;
        }
        layout
    }

    /// Ordinal position of a column value
    pub fn column_of(&self, a: i64) -> Option<usize> {
        self.columns.binary_search(&a).ok()
    }

    /// Ordinal position of a row value
    pub fn row_of(&self, b: i64) -> Option<usize> {
        self.rows.binary_search(&b).ok()
    }

    /// Top-left corner of a cell, relative to the grid origin
    pub fn cell_origin(&self, key: CellKey) -> Option<(f64, f64)> {
        let col = self.column_of(key.a)?;
        let row = self.row_of(key.b)?;
        Some((col as f64 * self.cell_width, row as f64 * self.cell_height))
    }

    /// Key of the grid slot under `pos` (relative to the grid origin).
    ///
    /// The slot may hold no items; callers check membership themselves.
    pub fn cell_at(&self, pos: (f64, f64)) -> Option<CellKey> {
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 || pos.0 < 0.0 || pos.1 < 0.0 {
            return None;
        }
        let col = (pos.0 / self.cell_width).floor() as usize;
        let row = (pos.1 / self.cell_height).floor() as usize;
        Some(CellKey::new(*self.columns.get(col)?, *self.rows.get(row)?))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new(0, 100.0, 50.0, 3, 1),
            Item::new(1, 200.0, 60.0, 2, 1),
            Item::new(2, 300.0, 70.0, 2, 2),
            Item::new(3, 400.0, 80.0, 3, 1),
        ]
    }

    #[test]
    fn test_group_cells() {
        let cells = group_cells(&items(), CategoricalAttribute::Bedrooms, CategoricalAttribute::Bathrooms);
        let keys: Vec<CellKey> = cells.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec![CellKey::new(2, 1), CellKey::new(2, 2), CellKey::new(3, 1)]);
        assert_eq!(cells[2].count(), 2);
    }

    #[test]
    fn test_missing_category_skipped() {
        let mut items = items();
        items[0].bathrooms = None;
        let cells = group_cells(&items, CategoricalAttribute::Bedrooms, CategoricalAttribute::Bathrooms);
        let total: usize = cells.iter().map(GridCell::count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_layout_geometry() {
        let cells = group_cells(&items(), CategoricalAttribute::Bedrooms, CategoricalAttribute::Bathrooms);
        let layout = GridLayout::compute(&cells, 400.0, 300.0);

        assert_eq!(layout.columns, vec![2, 3]);
        assert_eq!(layout.rows, vec![1, 2]);
        assert_eq!(layout.cell_width, 200.0);
        assert_eq!(layout.cell_height, 150.0);
        assert_eq!(layout.cell_origin(CellKey::new(3, 2)), Some((200.0, 150.0)));
        assert_eq!(layout.cell_at((250.0, 10.0)), Some(CellKey::new(3, 1)));
        assert_eq!(layout.cell_at((401.0, 10.0)), None);
    }

    #[test]
    fn test_ordinals_have_no_geometry() {
        let cells = group_cells(&items(), CategoricalAttribute::Bedrooms, CategoricalAttribute::Bathrooms);
        let ordinals = GridLayout::ordinals(&cells);

        assert_eq!(ordinals.columns, vec![2, 3]);
        assert_eq!(ordinals.column_of(3), Some(1));
        assert_eq!(ordinals.row_of(2), Some(1));
        assert_eq!(ordinals.cell_at((0.0, 0.0)), None);
    }

    #[test]
    fn test_empty_layout() {
        let layout = GridLayout::compute(&[], 400.0, 300.0);
        assert!(layout.is_empty());
        assert_eq!(layout.cell_width, 0.0);
        assert_eq!(layout.cell_at((10.0, 10.0)), None);
    }
}
