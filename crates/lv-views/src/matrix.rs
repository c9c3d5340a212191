//! Small-multiples matrix of packed circles
//!
//! Cells are selected by clicking or by dragging across a range of cells.
//! The drag may end anywhere on screen, so the release is observed through a
//! pointer-up listener rather than this view's own response.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use lv_core::events::{ListenerGuard, PointerHub};
use lv_core::grid::CellKey;
use lv_core::item::ItemIndex;
use lv_core::pack::{MatrixLayout, PackedCell};
use lv_core::{LinkedViews, MatrixConfig};

use crate::colors::{color_in_domain, with_opacity};
use crate::LinkedView;

/// Seconds a circle takes to grow or move after a re-layout
const TRANSITION_SECONDS: f32 = 1.0;

const CELL_FILL: Color32 = Color32::from_rgb(249, 249, 249);
const CELL_STROKE: Color32 = Color32::from_rgb(204, 204, 204);
const SELECTED_FILL: Color32 = Color32::from_rgb(227, 242, 253);
const SELECTED_STROKE: Color32 = Color32::from_rgb(25, 118, 210);
const LABEL_COLOR: Color32 = Color32::from_rgb(51, 51, 51);
const CIRCLE_STROKE: Color32 = Color32::WHITE;

/// Bedrooms x bathrooms grid of houses
pub struct MatrixView {
    /// Set by the pointer-up listener, consumed on the next frame
    released: Arc<AtomicBool>,
    _release_listener: ListenerGuard,
    /// Cell the pointer was over during the last frame of a press
    last_entered: Option<CellKey>,
    /// Item this view put into the hover set
    hovered: Option<ItemIndex>,
}

impl MatrixView {
    pub fn new(hub: &PointerHub) -> Self {
        let released = Arc::new(AtomicBool::new(false));
        let flag = released.clone();
        let listener = hub.register(move || flag.store(true, Ordering::Release));
        Self {
            released,
            _release_listener: listener,
            last_entered: None,
            hovered: None,
        }
    }

    fn handle_pointer(&mut self, engine: &mut LinkedViews, ui: &Ui, layout: &MatrixLayout, origin: Pos2, hovered: bool) {
        let (pressed, down, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });
        let local = pointer.map(|p| ((p.x - origin.x) as f64, (p.y - origin.y) as f64));
        let cell_under = local.and_then(|p| layout.cell_at(p));
        let circle_under = local.and_then(|p| layout.circle_at(p)).map(|(_, c)| c.index);

        // Pressing on a circle highlights it; pressing on a cell starts a gesture
        if pressed && hovered {
            match (circle_under, cell_under) {
                (Some(index), _) => {
                    engine.hover(index);
                    self.hovered = Some(index);
                }
                (None, Some(key)) => {
                    engine.cell_pointer_down(key);
                    self.last_entered = Some(key);
                }
                (None, None) => {}
            }
        }

        if down && hovered {
            if let Some(key) = cell_under {
                if self.last_entered != Some(key) {
                    self.last_entered = Some(key);
                    engine.cell_pointer_enter(key);
                }
            }
        }

        if self.released.swap(false, Ordering::AcqRel) {
            let over = if hovered { cell_under } else { None };
            engine.pointer_up(over);
            self.last_entered = None;
        }

        // Hover follows the pointer while no button is held
        if !down {
            match (hovered, circle_under) {
                (true, Some(index)) => {
                    if self.hovered != Some(index) {
                        engine.hover(index);
                        self.hovered = Some(index);
                    }
                }
                _ => {
                    if self.hovered.take().is_some() {
                        engine.hover_clear();
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for MatrixView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixView")
            .field("last_entered", &self.last_entered)
            .field("hovered", &self.hovered)
            .finish()
    }
}

impl LinkedView for MatrixView {
    fn title(&self) -> &str {
        "Bedrooms x Bathrooms"
    }

    fn ui(&mut self, engine: &mut LinkedViews, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = response.rect;
        let origin = rect.min;

        let layout = engine.matrix_layout(rect.width() as f64, rect.height() as f64);
        self.handle_pointer(engine, ui, &layout, origin, response.hovered());

        // Right click removes the house under the pointer
        if response.secondary_clicked() {
            let target = response
                .interact_pointer_pos()
                .and_then(|p| layout.circle_at(((p.x - origin.x) as f64, (p.y - origin.y) as f64)))
                .map(|(_, circle)| circle.index);
            if let Some(index) = target {
                if self.hovered == Some(index) {
                    self.hovered = None;
                }
                engine.remove(index);
            }
        }

        // The pointer handlers may have committed a new snapshot
        let layout = engine.matrix_layout(rect.width() as f64, rect.height() as f64);
        if layout.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No houses to show",
                FontId::proportional(14.0),
                LABEL_COLOR,
            );
        }
        for cell in &layout.cells {
            draw_cell(engine, &painter, origin, &layout, cell);
        }

        let tooltip = response
            .hover_pos()
            .and_then(|p| layout.circle_at(((p.x - origin.x) as f64, (p.y - origin.y) as f64)))
            .and_then(|(_, circle)| engine.current().iter().find(|item| item.index == circle.index))
            .map(|item| item.tooltip());
        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
    }
}

fn draw_cell(engine: &LinkedViews, painter: &egui::Painter, origin: Pos2, layout: &MatrixLayout, cell: &PackedCell) {
    let config = &engine.config().matrix;
    let min = origin + Vec2::new(cell.origin.0 as f32, cell.origin.1 as f32);
    let rect = Rect::from_min_size(
        min,
        Vec2::new(layout.grid.cell_width as f32, layout.grid.cell_height as f32),
    );
    let selected = engine.cells().contains(cell.key);
    let (fill, stroke) = if selected {
        (SELECTED_FILL, Stroke::new(3.0, SELECTED_STROKE))
    } else {
        (CELL_FILL, Stroke::new(1.0, CELL_STROKE))
    };
    painter.rect(rect.shrink(1.0), Rounding::ZERO, fill, stroke);

    painter.text(
        Pos2::new(rect.center().x, min.y + config.label_height as f32 / 2.0),
        Align2::CENTER_CENTER,
        cell_label(cell, config),
        FontId::proportional(12.0),
        if selected { SELECTED_STROKE } else { LABEL_COLOR },
    );

    let current = engine.current();
    let ctx = painter.ctx();
    for circle in &cell.circles {
        let Some(item) = current.iter().find(|item| item.index == circle.index) else {
            continue;
        };
        let id = egui::Id::new(("matrix-circle", circle.index));
        let center = Pos2::new(
            min.x + ctx.animate_value_with_time(id.with("x"), circle.x as f32, TRANSITION_SECONDS),
            min.y + ctx.animate_value_with_time(id.with("y"), circle.y as f32, TRANSITION_SECONDS),
        );
        let radius = ctx.animate_value_with_time(id.with("r"), circle.r as f32, TRANSITION_SECONDS);

        let emphasis = engine.matrix_emphasis(circle.index);
        let color = color_in_domain(item.price_per_area(), layout.color_domain);
        painter.circle(
            center,
            radius,
            with_opacity(color, emphasis.opacity),
            Stroke::new(1.0, with_opacity(CIRCLE_STROKE, emphasis.opacity)),
        );
    }
}

/// Label of a cell, e.g. `3BR / 2BA (12)`
fn cell_label(cell: &PackedCell, config: &MatrixConfig) -> String {
    format!(
        "{}{} / {}{} ({})",
        cell.key.a,
        config.column_attribute.short_label(),
        cell.key.b,
        config.row_attribute.short_label(),
        cell.count
    )
}
