//! Null value handling for CSV cells

use serde::{Deserialize, Serialize};

/// Which cell contents count as missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(), // Empty string
                "-".to_string(),
                "N/A".to_string(),
                "NA".to_string(),
                "null".to_string(),
                "None".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let value = self.prepare(value);
        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                value == pattern
            } else {
                value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Add a null pattern
    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Continuous value of a cell; `NaN` when null or unparseable
    pub fn parse_number(&self, value: Option<&str>) -> f64 {
        match value {
            Some(v) if !self.is_null(v) => self.prepare(v).parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Whole-number value of a cell; `None` when null or unparseable.
    ///
    /// Integral floats such as `3.0` are accepted.
    pub fn parse_integer(&self, value: Option<&str>) -> Option<i64> {
        let value = value.filter(|v| !self.is_null(v))?;
        let value = self.prepare(value);
        value.parse::<i64>().ok().or_else(|| {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                .map(|v| v as i64)
        })
    }

    /// Text value of a cell; `None` when null
    pub fn parse_text(&self, value: Option<&str>) -> Option<String> {
        value
            .filter(|v| !self.is_null(v))
            .map(|v| self.prepare(v).to_string())
    }

    fn prepare<'a>(&self, value: &'a str) -> &'a str {
        if self.trim_whitespace {
            value.trim()
        } else {
            value
        }
    }
}
