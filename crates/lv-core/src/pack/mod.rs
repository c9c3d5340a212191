//! Circle packing inside grid cells
//!
//! Every item of a cell becomes a circle whose radius comes from one radius
//! scale shared by the whole grid, so equal sizes read as equal radii across
//! cells. Packing only decides positions.

mod enclose;
mod siblings;

pub use enclose::{bounding_circle, enclose};
pub use siblings::pack_siblings;

use std::cmp::Ordering;

use crate::config::{Margin, MatrixConfig};
use crate::grid::{group_cells, CellKey, GridLayout};
use crate::item::{Item, ItemIndex, NumericAttribute};
use crate::scale::{extent, SqrtScale, DEFAULT_DOMAIN};

/// A circle in packing space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
}

/// An item placed inside its cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedCircle {
    pub index: ItemIndex,
    /// Center relative to the cell's top-left corner
    pub x: f64,
    pub y: f64,
    /// Radius from the shared radius scale
    pub r: f64,
}

impl PackedCircle {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).powi(2) + (y - self.y).powi(2) <= self.r * self.r
    }
}

/// Pack `items` into a cell of `cell_width` x `cell_height`.
///
/// The usable area excludes the cell padding on every side and the label band
/// at the top. Circles are placed largest first, ties broken by index.
pub fn pack_cell(
    items: &[Item],
    size_attribute: NumericAttribute,
    radius_scale: &SqrtScale,
    cell_width: f64,
    cell_height: f64,
    config: &MatrixConfig,
) -> Vec<PackedCircle> {
    if items.is_empty() {
        return Vec::new();
    }

    let min_radius = config.radius_range.0;
    let mut sized: Vec<(ItemIndex, f64)> = items
        .iter()
        .map(|item| {
            let r = radius_scale.map(size_attribute.value(item));
            (item.index, if r.is_finite() { r } else { min_radius })
        })
        .collect();
    sized.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let pack_width = cell_width - 2.0 * config.cell_padding;
    let pack_height = cell_height - 2.0 * config.cell_padding - config.label_height;
    let center_x = config.cell_padding + pack_width.max(0.0) / 2.0;
    let center_y = config.cell_padding + config.label_height + pack_height.max(0.0) / 2.0;
    let side = pack_width.min(pack_height);

    let mut circles: Vec<Circle> = sized.iter().map(|&(_, r)| Circle::new(0.0, 0.0, r)).collect();
    let scale = if side > 0.0 {
        fit_padded(&mut circles, config.pack_padding, side)
    } else {
        0.0
    };

    sized
        .iter()
        .zip(&circles)
        .map(|(&(index, r), circle)| PackedCircle {
            index,
            x: center_x + circle.x * scale,
            y: center_y + circle.y * scale,
            r,
        })
        .collect()
}

/// Pack with a gap of `padding` between circles and return the factor that
/// makes the enclosure span `side`.
///
/// The gap is expressed in output pixels, so it is converted to packing units
/// with an unpadded pass first.
fn fit_padded(circles: &mut [Circle], padding: f64, side: f64) -> f64 {
    let unpadded = pack_siblings(circles);
    let pad = padding * unpadded / side;

    let mut enclosing = unpadded;
    if pad > 0.0 {
        for circle in circles.iter_mut() {
            circle.r += pad;
        }
        enclosing = pack_siblings(circles) + pad;
        for circle in circles.iter_mut() {
            circle.r -= pad;
        }
    }

    if enclosing > 0.0 {
        side / (2.0 * enclosing)
    } else {
        0.0
    }
}

/// A grid cell with its packed circles
#[derive(Debug, Clone, PartialEq)]
pub struct PackedCell {
    pub key: CellKey,
    pub count: usize,
    /// Top-left corner in view coordinates
    pub origin: (f64, f64),
    pub circles: Vec<PackedCircle>,
}

/// Everything the matrix view needs to draw one frame
#[derive(Debug, Clone)]
pub struct MatrixLayout {
    pub grid: GridLayout,
    pub cells: Vec<PackedCell>,
    pub radius_scale: SqrtScale,
    /// Price per area extent, for coloring
    pub color_domain: (f64, f64),
    pub margin: Margin,
}

impl MatrixLayout {
    /// Grid slot under `pos` (view coordinates), occupied or not
    pub fn cell_at(&self, pos: (f64, f64)) -> Option<CellKey> {
        self.grid
            .cell_at((pos.0 - self.margin.left, pos.1 - self.margin.top))
    }

    pub fn cell(&self, key: CellKey) -> Option<&PackedCell> {
        self.cells.iter().find(|cell| cell.key == key)
    }

    /// Topmost circle under `pos` (view coordinates)
    pub fn circle_at(&self, pos: (f64, f64)) -> Option<(CellKey, &PackedCircle)> {
        let cell = self.cell(self.cell_at(pos)?)?;
        let local = (pos.0 - cell.origin.0, pos.1 - cell.origin.1);
        cell.circles
            .iter()
            .rev()
            .find(|circle| circle.contains(local.0, local.1))
            .map(|circle| (cell.key, circle))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Group `items`, lay out the grid and pack every cell.
///
/// The radius scale and color domain are computed over all of `items`, so
/// every cell shares them.
pub fn layout_matrix(items: &[Item], width: f64, height: f64, config: &MatrixConfig) -> MatrixLayout {
    let (inner_width, inner_height) = config.margin.inner_size(width, height);
    let groups = group_cells(items, config.column_attribute, config.row_attribute);
    let grid = GridLayout::compute(&groups, inner_width, inner_height);

    let radius_scale = SqrtScale::from_values(
        items.iter().map(|item| config.size_attribute.value(item)),
        config.radius_range,
    );
    let color_domain =
        extent(items.iter().map(Item::price_per_area)).unwrap_or(DEFAULT_DOMAIN);

    let cells = groups
        .iter()
        .filter_map(|group| {
            let (x, y) = grid.cell_origin(group.key)?;
            Some(PackedCell {
                key: group.key,
                count: group.count(),
                origin: (config.margin.left + x, config.margin.top + y),
                circles: pack_cell(
                    &group.items,
                    config.size_attribute,
                    &radius_scale,
                    grid.cell_width,
                    grid.cell_height,
                    config,
                ),
            })
        })
        .collect();

    MatrixLayout {
        grid,
        cells,
        radius_scale,
        color_domain,
        margin: config.margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MatrixConfig {
        MatrixConfig::default()
    }

    fn items() -> Vec<Item> {
        vec![
            Item::new(0, 100.0, 50.0, 2, 1),
            Item::new(1, 200.0, 120.0, 2, 1),
            Item::new(2, 300.0, 80.0, 3, 1),
            Item::new(3, 400.0, 120.0, 3, 2),
            Item::new(4, 500.0, 200.0, 2, 2),
            Item::new(5, 600.0, 50.0, 2, 1),
        ]
    }

    #[test]
    fn test_equal_size_equal_radius_across_cells() {
        let layout = layout_matrix(&items(), 800.0, 600.0, &config());
        let radius_of = |index: u32| {
            layout
                .cells
                .iter()
                .flat_map(|cell| &cell.circles)
                .find(|circle| circle.index == ItemIndex(index))
                .map(|circle| circle.r)
                .unwrap()
        };

        // Area 120 in cells (2,1) and (3,2); area 50 twice in (2,1)
        assert_eq!(radius_of(1), radius_of(3));
        assert_eq!(radius_of(0), radius_of(5));
        assert_eq!(radius_of(0), 2.0);
        assert_eq!(radius_of(4), 20.0);
    }

    #[test]
    fn test_single_item_is_centered() {
        let config = config();
        let scale = SqrtScale::from_values(vec![50.0], config.radius_range);
        let packed = pack_cell(
            &[Item::new(0, 1.0, 50.0, 2, 1)],
            NumericAttribute::Area,
            &scale,
            200.0,
            165.0,
            &config,
        );

        assert_eq!(packed.len(), 1);
        // Usable area 180 x 120 below a 25 px label band
        assert!((packed[0].x - 100.0).abs() < 1e-9);
        assert!((packed[0].y - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_items() {
        let config = config();
        let scale = SqrtScale::from_values(Vec::new(), config.radius_range);
        assert!(pack_cell(&[], NumericAttribute::Area, &scale, 100.0, 100.0, &config).is_empty());

        let layout = layout_matrix(&[], 800.0, 600.0, &config);
        assert!(layout.is_empty());
        assert!(layout.grid.is_empty());
        assert_eq!(layout.cell_at((100.0, 100.0)), None);
    }

    #[test]
    fn test_circles_stay_apart_and_inside() {
        let config = config();
        let many: Vec<Item> = (0..30)
            .map(|i| Item::new(i, 100.0, 40.0 + (i % 9) as f64 * 30.0, 2, 1))
            .collect();
        let layout = layout_matrix(&many, 600.0, 600.0, &config);
        let cell = &layout.cells[0];

        for (i, a) in cell.circles.iter().enumerate() {
            for b in &cell.circles[i + 1..] {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                // Positions are scaled while radii are not, so compare centers only
                assert!(d > 0.0, "{:?} and {:?} share a center", a.index, b.index);
            }
            assert!(a.r >= 2.0 && a.r <= 20.0);
            assert!(a.x >= config.cell_padding && a.x <= layout.grid.cell_width - config.cell_padding);
            assert!(a.y >= config.cell_padding + config.label_height);
        }
    }

    #[test]
    fn test_order_largest_first_then_index() {
        let layout = layout_matrix(&items(), 800.0, 600.0, &config());
        let cell = layout.cell(CellKey::new(2, 1)).unwrap();
        let order: Vec<u32> = cell.circles.iter().map(|c| c.index.0).collect();
        assert_eq!(order, vec![1, 0, 5]);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let first = layout_matrix(&items(), 800.0, 600.0, &config());
        let second = layout_matrix(&items(), 800.0, 600.0, &config());
        assert_eq!(first.cells, second.cells);
    }

    #[test]
    fn test_hit_testing() {
        let layout = layout_matrix(&items(), 800.0, 600.0, &config());
        let cell = layout.cell(CellKey::new(3, 2)).unwrap();
        let circle = cell.circles[0];
        let pos = (cell.origin.0 + circle.x, cell.origin.1 + circle.y);

        assert_eq!(layout.cell_at(pos), Some(CellKey::new(3, 2)));
        let (key, hit) = layout.circle_at(pos).unwrap();
        assert_eq!(key, CellKey::new(3, 2));
        assert_eq!(hit.index, ItemIndex(3));
        assert_eq!(layout.cell_at((5.0, 5.0)), None);
    }

    #[test]
    fn test_non_finite_size_uses_min_radius() {
        let mut list = items();
        list[2].area = f64::NAN;
        let layout = layout_matrix(&list, 800.0, 600.0, &config());
        let cell = layout.cell(CellKey::new(3, 1)).unwrap();
        assert_eq!(cell.circles[0].r, 2.0);
    }
}
