//! egui views over the linked-views engine

pub mod colors;
mod matrix;
mod scatter;

pub use matrix::MatrixView;
pub use scatter::ScatterPlotView;

use egui::Ui;
use lv_core::LinkedViews;

/// A view drawn from, and feeding events into, the shared engine
pub trait LinkedView {
    /// Heading shown above the view
    fn title(&self) -> &str;

    /// Draw the view and forward this frame's pointer events to `engine`
    fn ui(&mut self, engine: &mut LinkedViews, ui: &mut Ui);
}
