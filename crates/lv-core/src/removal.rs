//! Soft deletion of outliers

use ahash::AHashSet;

use crate::item::{Item, ItemIndex};

/// Indices excluded for the rest of the session.
///
/// Removal is not a filtering action and is never undone by history
/// navigation.
#[derive(Debug, Clone, Default)]
pub struct RemovalSet {
    removed: AHashSet<ItemIndex>,
}

impl RemovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` as removed.
    ///
    /// Returns `false` without changing anything when the index is not part of
    /// `full` or was already removed.
    pub fn remove(&mut self, index: ItemIndex, full: &[Item]) -> bool {
        if !full.iter().any(|item| item.index == index) {
            tracing::debug!("Ignoring removal of unknown item {}", index);
            return false;
        }
        self.removed.insert(index)
    }

    pub fn contains(&self, index: ItemIndex) -> bool {
        self.removed.contains(&index)
    }

    /// Items of `items` that survive the removals, order preserved
    pub fn filter(&self, items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| !self.removed.contains(&item.index))
            .cloned()
            .collect()
    }

    /// Whether any item of `items` is removed
    pub fn touches(&self, items: &[Item]) -> bool {
        !self.removed.is_empty() && items.iter().any(|item| self.removed.contains(&item.index))
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        (0..4).map(|i| Item::new(i, 100.0 * i as f64, 50.0, 2, 1)).collect()
    }

    #[test]
    fn test_remove_known_item() {
        let full = items();
        let mut removal = RemovalSet::new();

        assert!(removal.remove(ItemIndex(2), &full));
        assert!(removal.contains(ItemIndex(2)));

        let kept = removal.filter(&full);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|item| item.index != ItemIndex(2)));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let full = items();
        let mut removal = RemovalSet::new();

        assert!(!removal.remove(ItemIndex(42), &full));
        assert!(removal.is_empty());
        assert!(!removal.touches(&full));
    }

    #[test]
    fn test_remove_twice() {
        let full = items();
        let mut removal = RemovalSet::new();

        assert!(removal.remove(ItemIndex(1), &full));
        assert!(!removal.remove(ItemIndex(1), &full));
        assert_eq!(removal.len(), 1);
    }
}
