//! Rectangular brushing over two continuous attributes

use crate::item::{Item, NumericAttribute};
use crate::scale::LinearScale;

/// A brushed rectangle in screen coordinates of the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRegion {
    /// Build a region from two corners in any order
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Zero width or height; such a region clears instead of filtering
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Inclusive containment test
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Result of applying a brush
#[derive(Debug, Clone, PartialEq)]
pub enum BrushOutcome {
    /// Brush removed or degenerate: restore default emphasis, no filtering
    Cleared,
    /// A real region that contains no item
    Empty,
    /// Matched items, in snapshot order
    Selected(Vec<Item>),
}

/// Maps items to screen space and selects those inside a region.
///
/// Scales are rebuilt from the snapshot the selector is built for, so the axes
/// always reflect what is visible.
#[derive(Debug, Clone)]
pub struct BrushSelector {
    pub x_attribute: NumericAttribute,
    pub y_attribute: NumericAttribute,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
}

impl BrushSelector {
    pub fn new(
        snapshot: &[Item],
        x_attribute: NumericAttribute,
        y_attribute: NumericAttribute,
        width: f64,
        height: f64,
    ) -> Self {
        let x_scale = LinearScale::from_values(
            snapshot.iter().map(|item| x_attribute.value(item)),
            (0.0, width),
        );
        // Screen y grows downwards
        let y_scale = LinearScale::from_values(
            snapshot.iter().map(|item| y_attribute.value(item)),
            (height, 0.0),
        );
        Self {
            x_attribute,
            y_attribute,
            x_scale,
            y_scale,
        }
    }

    /// Screen position of an item; `NaN` components for missing values
    pub fn project(&self, item: &Item) -> (f64, f64) {
        (
            self.x_scale.map(self.x_attribute.value(item)),
            self.y_scale.map(self.y_attribute.value(item)),
        )
    }

    /// Apply `region` (or its absence) to `snapshot`
    pub fn select(&self, snapshot: &[Item], region: Option<BrushRegion>) -> BrushOutcome {
        let region = match region {
            Some(region) if !region.is_degenerate() => region,
            _ => return BrushOutcome::Cleared,
        };

        let matched: Vec<Item> = snapshot
            .iter()
            .filter(|item| {
                let (x, y) = self.project(item);
                region.contains(x, y)
            })
            .cloned()
            .collect();

        tracing::debug!(
            "Brush [{:.1},{:.1}]x[{:.1},{:.1}] matched {} of {} items",
            region.x0,
            region.x1,
            region.y0,
            region.y1,
            matched.len(),
            snapshot.len()
        );

        if matched.is_empty() {
            BrushOutcome::Empty
        } else {
            BrushOutcome::Selected(matched)
        }
    }
}

/// Pointer gesture producing a brush region
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BrushGesture {
    #[default]
    Idle,
    Brushing {
        origin: (f64, f64),
        current: (f64, f64),
    },
}

impl BrushGesture {
    /// Start a new brush, replacing any brush in progress
    pub fn begin(&mut self, pos: (f64, f64)) {
        *self = BrushGesture::Brushing {
            origin: pos,
            current: pos,
        };
    }

    pub fn update(&mut self, pos: (f64, f64)) {
        if let BrushGesture::Brushing { current, .. } = self {
            *current = pos;
        }
    }

    /// Region currently covered, if brushing
    pub fn region(&self) -> Option<BrushRegion> {
        match *self {
            BrushGesture::Idle => None,
            BrushGesture::Brushing { origin, current } => {
                Some(BrushRegion::from_corners(origin, current))
            }
        }
    }

    /// End the gesture and return the final region
    pub fn finish(&mut self) -> Option<BrushRegion> {
        let region = self.region();
        *self = BrushGesture::Idle;
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemIndex;

    fn items() -> Vec<Item> {
        vec![
            Item::new(0, 100.0, 10.0, 2, 1),
            Item::new(1, 200.0, 20.0, 2, 1),
            Item::new(2, 300.0, 30.0, 3, 1),
            Item::new(3, 400.0, 40.0, 3, 2),
            Item::new(4, 500.0, 50.0, 4, 2),
        ]
    }

    fn selector(items: &[Item]) -> BrushSelector {
        BrushSelector::new(items, NumericAttribute::Area, NumericAttribute::Price, 400.0, 400.0)
    }

    fn selected_ids(outcome: &BrushOutcome) -> Vec<ItemIndex> {
        match outcome {
            BrushOutcome::Selected(items) => items.iter().map(|i| i.index).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_inclusive_bounds() {
        let items = items();
        let selector = selector(&items);
        // Area 20 -> x 100, area 40 -> x 300; price 200 -> y 300, price 400 -> y 100
        let region = BrushRegion::from_corners((100.0, 100.0), (300.0, 300.0));

        let outcome = selector.select(&items, Some(region));
        assert_eq!(selected_ids(&outcome), vec![ItemIndex(1), ItemIndex(2), ItemIndex(3)]);
    }

    #[test]
    fn test_same_region_twice_is_idempotent() {
        let items = items();
        let selector = selector(&items);
        let region = BrushRegion::from_corners((0.0, 0.0), (250.0, 400.0));

        let first = selector.select(&items, Some(region));
        let second = selector.select(&items, Some(region));
        assert_eq!(first, second);
        assert_eq!(selected_ids(&first).len(), 3);
    }

    #[test]
    fn test_degenerate_region_clears() {
        let items = items();
        let selector = selector(&items);

        let flat = BrushRegion::from_corners((10.0, 50.0), (300.0, 50.0));
        assert_eq!(selector.select(&items, Some(flat)), BrushOutcome::Cleared);
        assert_eq!(selector.select(&items, None), BrushOutcome::Cleared);
    }

    #[test]
    fn test_region_without_items_is_empty() {
        let items = items();
        let selector = selector(&items);
        let region = BrushRegion::from_corners((10.0, 10.0), (20.0, 20.0));
        assert_eq!(selector.select(&items, Some(region)), BrushOutcome::Empty);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let mut items = items();
        items[2].price = f64::NAN;
        let selector = selector(&items);
        let region = BrushRegion::from_corners((0.0, 0.0), (400.0, 400.0));

        let ids = selected_ids(&selector.select(&items, Some(region)));
        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&ItemIndex(2)));
    }

    #[test]
    fn test_degenerate_domain_is_deterministic() {
        let items: Vec<Item> = (0..3).map(|i| Item::new(i, 250.0, 10.0 * i as f64, 2, 1)).collect();
        let selector = selector(&items);
        let (_, y) = selector.project(&items[0]);
        assert_eq!(y, 200.0);
    }

    #[test]
    fn test_gesture() {
        let mut gesture = BrushGesture::default();
        assert!(gesture.finish().is_none());

        gesture.begin((50.0, 80.0));
        gesture.update((10.0, 120.0));
        let region = gesture.finish().unwrap();
        assert_eq!(region, BrushRegion { x0: 10.0, y0: 80.0, x1: 50.0, y1: 120.0 });
        assert_eq!(gesture, BrushGesture::Idle);
    }
}
