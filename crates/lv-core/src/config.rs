//! Engine configuration
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highlight::{CellEmphasisStyle, EmphasisStyle};
use crate::item::{CategoricalAttribute, NumericAttribute};
use crate::CoreError;

/// Space kept free around a view's drawing area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Drawing area left inside `width` x `height`, never negative
    pub fn inner_size(&self, width: f64, height: f64) -> (f64, f64) {
        (
            (width - self.left - self.right).max(0.0),
            (height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Scatter view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub x_attribute: NumericAttribute,
    pub y_attribute: NumericAttribute,
    pub margin: Margin,
    pub point_radius: f32,
    pub emphasis: EmphasisStyle,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            x_attribute: NumericAttribute::Area,
            y_attribute: NumericAttribute::Price,
            margin: Margin {
                top: 100.0,
                right: 10.0,
                bottom: 50.0,
                left: 100.0,
            },
            point_radius: 3.0,
            emphasis: EmphasisStyle::default(),
        }
    }
}

/// Matrix (small multiples) view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Attribute laid out along columns
    pub column_attribute: CategoricalAttribute,
    /// Attribute laid out along rows
    pub row_attribute: CategoricalAttribute,
    /// Attribute driving circle radii
    pub size_attribute: NumericAttribute,
    pub margin: Margin,
    /// Padding inside each cell
    pub cell_padding: f64,
    /// Band reserved for the cell label
    pub label_height: f64,
    /// Gap between packed circles
    pub pack_padding: f64,
    /// Smallest and largest circle radius
    pub radius_range: (f64, f64),
    pub emphasis: CellEmphasisStyle,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            column_attribute: CategoricalAttribute::Bedrooms,
            row_attribute: CategoricalAttribute::Bathrooms,
            size_attribute: NumericAttribute::Area,
            margin: Margin::uniform(20.0),
            cell_padding: 10.0,
            label_height: 25.0,
            pack_padding: 3.0,
            radius_range: (2.0, 20.0),
            emphasis: CellEmphasisStyle::default(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scatter: ScatterConfig,
    pub matrix: MatrixConfig,
    /// Maximum number of history entries, unlimited when `None`
    pub history_limit: Option<usize>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "matrix": { "cell_padding": 4.0, "row_attribute": "stories" }, "history_limit": 10 }"#,
        )
        .unwrap();

        assert_eq!(config.matrix.cell_padding, 4.0);
        assert_eq!(config.matrix.row_attribute, CategoricalAttribute::Stories);
        assert_eq!(config.matrix.label_height, 25.0);
        assert_eq!(config.scatter, ScatterConfig::default());
        assert_eq!(config.history_limit, Some(10));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_inner_size_never_negative() {
        let margin = Margin::uniform(20.0);
        assert_eq!(margin.inner_size(100.0, 30.0), (60.0, 0.0));
    }
}
