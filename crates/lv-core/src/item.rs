//! Item model: the typed housing record and its identity key

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identity of an item, assigned once at ingestion and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemIndex(pub u32);

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered, immutable sequence of items as currently displayed.
///
/// Cloning a snapshot is cheap, which is what lets the history keep one per
/// entry.
pub type Snapshot = Arc<[Item]>;

/// A single house of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity key
    pub index: ItemIndex,

    /// Asking price (position-driving attribute)
    pub price: f64,

    /// Living area in m² (size-driving attribute)
    pub area: f64,

    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub stories: Option<i64>,
    pub parking: Option<i64>,

    // Display-only fields
    pub mainroad: Option<String>,
    pub guestroom: Option<String>,
    pub basement: Option<String>,
    pub hotwaterheating: Option<String>,
    pub airconditioning: Option<String>,
    pub prefarea: Option<String>,
    pub furnishingstatus: Option<String>,
}

impl Item {
    /// Create an item with the attributes the views need; display fields are empty
    pub fn new(index: u32, price: f64, area: f64, bedrooms: i64, bathrooms: i64) -> Self {
        Self {
            index: ItemIndex(index),
            price,
            area,
            bedrooms: Some(bedrooms),
            bathrooms: Some(bathrooms),
            stories: None,
            parking: None,
            mainroad: None,
            guestroom: None,
            basement: None,
            hotwaterheating: None,
            airconditioning: None,
            prefarea: None,
            furnishingstatus: None,
        }
    }

    /// Price per square meter, `NaN` when either side is missing or the area is zero
    pub fn price_per_area(&self) -> f64 {
        if self.area == 0.0 {
            return f64::NAN;
        }
        self.price / self.area
    }

    /// Multi-line description shown when hovering an item
    pub fn tooltip(&self) -> String {
        let price = if self.price.is_finite() {
            format!("€{}", group_thousands(self.price.round() as i64))
        } else {
            "N/A".to_string()
        };
        let per_area = self.price_per_area();
        let per_area = if per_area.is_finite() {
            format!("€{}", per_area.round() as i64)
        } else {
            "N/A".to_string()
        };
        let area = if self.area.is_finite() {
            format!("{}m²", self.area)
        } else {
            "N/A".to_string()
        };

        format!(
            "Price: {}\nPrice/m²: {}\nArea: {}\nBedrooms: {}\nBathrooms: {}\nStories: {}\n\
             Main Road: {}\nGuest Room: {}\nBasement: {}\nHot Water Heating: {}\n\
             Air Conditioning: {}\nParking: {}\nPreferred Area: {}\nFurnishing Status: {}",
            price,
            per_area,
            area,
            opt_int(self.bedrooms),
            opt_int(self.bathrooms),
            opt_int(self.stories),
            opt_str(&self.mainroad),
            opt_str(&self.guestroom),
            opt_str(&self.basement),
            opt_str(&self.hotwaterheating),
            opt_str(&self.airconditioning),
            opt_int(self.parking),
            opt_str(&self.prefarea),
            opt_str(&self.furnishingstatus),
        )
    }
}

fn opt_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn opt_str(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Continuous attributes usable as a scale input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericAttribute {
    Price,
    Area,
    Bedrooms,
    Bathrooms,
    Stories,
    Parking,
}

impl NumericAttribute {
    /// Read the attribute; missing values read as `NaN`
    pub fn value(self, item: &Item) -> f64 {
        let int = |v: Option<i64>| v.map(|v| v as f64).unwrap_or(f64::NAN);
        match self {
            NumericAttribute::Price => item.price,
            NumericAttribute::Area => item.area,
            NumericAttribute::Bedrooms => int(item.bedrooms),
            NumericAttribute::Bathrooms => int(item.bathrooms),
            NumericAttribute::Stories => int(item.stories),
            NumericAttribute::Parking => int(item.parking),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericAttribute::Price => "Price",
            NumericAttribute::Area => "Area (m²)",
            NumericAttribute::Bedrooms => "Bedrooms",
            NumericAttribute::Bathrooms => "Bathrooms",
            NumericAttribute::Stories => "Stories",
            NumericAttribute::Parking => "Parking",
        }
    }
}

/// Discrete attributes usable as grid axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoricalAttribute {
    Bedrooms,
    Bathrooms,
    Stories,
    Parking,
}

impl CategoricalAttribute {
    pub fn value(self, item: &Item) -> Option<i64> {
        match self {
            CategoricalAttribute::Bedrooms => item.bedrooms,
            CategoricalAttribute::Bathrooms => item.bathrooms,
            CategoricalAttribute::Stories => item.stories,
            CategoricalAttribute::Parking => item.parking,
        }
    }

    /// Short suffix used in cell labels, e.g. `3BR`
    pub fn short_label(self) -> &'static str {
        match self {
            CategoricalAttribute::Bedrooms => "BR",
            CategoricalAttribute::Bathrooms => "BA",
            CategoricalAttribute::Stories => "ST",
            CategoricalAttribute::Parking => "P",
        }
    }
}

/// Collect the identity keys of a sequence of items
pub fn indices_of<'a>(items: impl IntoIterator<Item = &'a Item>) -> ahash::AHashSet<ItemIndex> {
    items.into_iter().map(|item| item.index).collect()
}
