//! Core engine of the linked views
//!
//! This crate holds everything that decides what the views show: the item
//! model, the filtering history, brush and grid selection, circle packing,
//! emphasis and removal. Rendering lives in `lv-views`.

pub mod brush;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod highlight;
pub mod history;
pub mod item;
pub mod pack;
pub mod removal;
pub mod scale;
pub mod selection;

// Re-export commonly used types
pub use brush::{BrushGesture, BrushOutcome, BrushRegion, BrushSelector};
pub use config::{EngineConfig, Margin, MatrixConfig, ScatterConfig};
pub use engine::LinkedViews;
pub use events::{ListenerGuard, PointerHub};
pub use grid::{CellKey, CellSelection, DragState, GridLayout};
pub use highlight::{Emphasis, EmphasisStyle, HighlightSet};
pub use history::{HistoryContext, HistoryManager};
pub use item::{CategoricalAttribute, Item, ItemIndex, NumericAttribute, Snapshot};
pub use pack::{MatrixLayout, PackedCell, PackedCircle};
pub use removal::RemovalSet;
pub use selection::SelectionState;

/// Errors raised by the engine
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
