//! Scatter plot with rectangular brushing

use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use lv_core::brush::{BrushGesture, BrushOutcome, BrushRegion};
use lv_core::item::ItemIndex;
use lv_core::scale::LinearScale;
use lv_core::LinkedViews;

use crate::colors::with_opacity;
use crate::LinkedView;

/// Seconds a marker takes to move to a new position
const TRANSITION_SECONDS: f32 = 1.0;
const TICK_COUNT: usize = 5;
const AXIS_COLOR: Color32 = Color32::from_gray(60);
const MARKER_COLOR: Color32 = Color32::BLACK;
const BORDER_COLOR: Color32 = Color32::RED;
/// Opacity of markers outside a brush while it is being drawn
const OUTSIDE_BRUSH_OPACITY: f32 = 0.1;

/// Price versus area, brushed to filter
#[derive(Debug, Default)]
pub struct ScatterPlotView {
    gesture: BrushGesture,
}

impl ScatterPlotView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkedView for ScatterPlotView {
    fn title(&self) -> &str {
        "Price vs. Area"
    }

    fn ui(&mut self, engine: &mut LinkedViews, ui: &mut Ui) {
        let config = engine.config().scatter.clone();
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        let (width, height) = config.margin.inner_size(rect.width() as f64, rect.height() as f64);
        let plot = Rect::from_min_size(
            rect.min + Vec2::new(config.margin.left as f32, config.margin.top as f32),
            Vec2::new(width as f32, height as f32),
        );
        let to_plot = |pos: Pos2| {
            (
                (pos.x.clamp(plot.min.x, plot.max.x) - plot.min.x) as f64,
                (pos.y.clamp(plot.min.y, plot.max.y) - plot.min.y) as f64,
            )
        };

        // Brush gesture
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.gesture.begin(to_plot(pos));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.gesture.update(to_plot(pos));
            }
        }
        if response.drag_released() {
            let region = self.gesture.finish();
            match engine.brush(region, width, height) {
                BrushOutcome::Selected(items) => tracing::debug!("Brush selected {} items", items.len()),
                other => tracing::debug!("Brush ended: {:?}", other),
            }
        }

        let selector = engine.scatter_selector(width, height);
        draw_axes(&painter, plot, &selector.x_scale, &selector.y_scale);
        painter.text(
            Pos2::new(plot.center().x, plot.max.y + 40.0),
            Align2::CENTER_CENTER,
            selector.x_attribute.label(),
            FontId::proportional(13.0),
            AXIS_COLOR,
        );
        painter.text(
            Pos2::new(plot.min.x - 60.0, plot.min.y - 20.0),
            Align2::LEFT_CENTER,
            selector.y_attribute.label(),
            FontId::proportional(13.0),
            AXIS_COLOR,
        );

        // Markers
        let live_region = self.gesture.region();
        let highlight = engine.scatter_highlight_set();
        let radius = config.point_radius;
        let hover_pos = response.hover_pos();
        let mut under_pointer: Option<ItemIndex> = None;
        let mut tooltip: Option<String> = None;

        for item in engine.current().iter() {
            let (x, y) = selector.project(item);
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let id = response.id.with(item.index);
            let ctx = ui.ctx();
            let center = Pos2::new(
                plot.min.x + ctx.animate_value_with_time(id.with("x"), x as f32, TRANSITION_SECONDS),
                plot.min.y + ctx.animate_value_with_time(id.with("y"), y as f32, TRANSITION_SECONDS),
            );

            let emphasis = highlight.emphasis(item.index, &config.emphasis);
            let (opacity, border) = match live_region {
                Some(region) if !region.is_degenerate() => {
                    let inside = region.contains(x, y);
                    (if inside { 1.0 } else { OUTSIDE_BRUSH_OPACITY }, emphasis.border)
                }
                _ => (emphasis.opacity, emphasis.border),
            };

            painter.circle_filled(center, radius, with_opacity(MARKER_COLOR, opacity));
            if border {
                painter.circle_stroke(center, radius, Stroke::new(2.0, BORDER_COLOR));
            }

            if hover_pos.is_some_and(|p| p.distance(center) <= radius + 1.0) {
                under_pointer = Some(item.index);
                tooltip = Some(item.tooltip());
            }
        }

        if let Some(region) = live_region {
            painter.rect(
                brush_rect(plot, region),
                Rounding::ZERO,
                Color32::from_rgba_unmultiplied(119, 119, 119, 60),
                Stroke::new(1.0, Color32::WHITE),
            );
        }

        if response.clicked() {
            if let Some(index) = under_pointer {
                engine.select_item(index);
            }
        }
        if let Some(text) = tooltip {
            response.on_hover_text_at_pointer(text);
        }
    }
}

fn brush_rect(plot: Rect, region: BrushRegion) -> Rect {
    Rect::from_min_max(
        Pos2::new(plot.min.x + region.x0 as f32, plot.min.y + region.y0 as f32),
        Pos2::new(plot.min.x + region.x1 as f32, plot.min.y + region.y1 as f32),
    )
}

fn draw_axes(painter: &egui::Painter, plot: Rect, x_scale: &LinearScale, y_scale: &LinearScale) {
    let stroke = Stroke::new(1.0, AXIS_COLOR);
    let font = FontId::proportional(11.0);

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], stroke);
    painter.line_segment([plot.left_top(), plot.left_bottom()], stroke);

    for value in x_scale.ticks(TICK_COUNT) {
        let x = plot.min.x + x_scale.map(value) as f32;
        painter.line_segment([Pos2::new(x, plot.max.y), Pos2::new(x, plot.max.y + 6.0)], stroke);
        painter.text(
            Pos2::new(x, plot.max.y + 9.0),
            Align2::CENTER_TOP,
            format_tick(value),
            font.clone(),
            AXIS_COLOR,
        );
    }
    for value in y_scale.ticks(TICK_COUNT) {
        let y = plot.min.y + y_scale.map(value) as f32;
        painter.line_segment([Pos2::new(plot.min.x - 6.0, y), Pos2::new(plot.min.x, y)], stroke);
        painter.text(
            Pos2::new(plot.min.x - 9.0, y),
            Align2::RIGHT_CENTER,
            format_tick(value),
            font.clone(),
            AXIS_COLOR,
        );
    }
}

/// Compact tick label, e.g. `1.2M` or `7.4k`
fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.0}k", value / 1e3)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}
