use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometry and grammar of one family of order documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Horizontal interval holding product codes (left edge of the block).
    pub product_band: Band,
    /// Horizontal interval holding quantities (left edge of the block).
    pub quantity_band: Band,
    /// Regex located anywhere in the trimmed block text; the match is the product code.
    pub product_pattern: String,
    /// Literal text marking the block that carries the printed page number.
    pub page_marker: String,
    /// A quantity sits on a product's row when their tops differ by less than this (points).
    pub row_tolerance: f64,
    #[serde(default)]
    pub matching: MatchMode,
}

/// Open interval `(min, max)` on the x axis, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    /// Both ends are excluded.
    pub fn contains(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    pub fn overlaps(&self, other: &Band) -> bool {
        self.min < other.max && other.min < self.max
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}

/// How products claim quantities on the same page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Each product takes the first quantity within tolerance, in discovery
    /// order, even if another product already took it.
    #[default]
    FirstWithinTolerance,
    /// Each quantity is taken by at most one product; later products skip
    /// quantities already taken.
    Exclusive,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::FirstWithinTolerance => write!(f, "first_within_tolerance"),
            MatchMode::Exclusive => write!(f, "exclusive"),
        }
    }
}
