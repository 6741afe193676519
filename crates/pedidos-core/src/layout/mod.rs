pub mod builtin;
pub mod schema;

use crate::error::PedidosError;
use regex::Regex;
use schema::{LayoutConfig, MatchMode};
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutConfig, PedidosError> {
    let content = std::fs::read_to_string(path).map_err(|e| PedidosError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutConfig, PedidosError> {
    let layout: LayoutConfig = serde_json::from_str(json).map_err(|e| PedidosError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutConfig, PedidosError> {
    let layout: LayoutConfig = serde_json::from_str(json).map_err(PedidosError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &LayoutConfig) -> Result<(), PedidosError> {
    for (label, band) in [
        ("product_band", &layout.product_band),
        ("quantity_band", &layout.quantity_band),
    ] {
        if !band.min.is_finite() || !band.max.is_finite() {
            return Err(PedidosError::LayoutInvalid(format!(
                "{} must have finite bounds",
                label
            )));
        }
        if band.min >= band.max {
            return Err(PedidosError::LayoutInvalid(format!(
                "{} {} is empty (min must be below max)",
                label, band
            )));
        }
    }

    if layout.product_band.overlaps(&layout.quantity_band) {
        return Err(PedidosError::LayoutInvalid(format!(
            "product_band {} overlaps quantity_band {}",
            layout.product_band, layout.quantity_band
        )));
    }

    if !layout.row_tolerance.is_finite() || layout.row_tolerance <= 0.0 {
        return Err(PedidosError::LayoutInvalid(format!(
            "row_tolerance must be a positive number, got {}",
            layout.row_tolerance
        )));
    }

    if layout.page_marker.is_empty() {
        return Err(PedidosError::LayoutInvalid(
            "page_marker must not be empty".into(),
        ));
    }

    if layout.product_pattern.is_empty() {
        return Err(PedidosError::LayoutInvalid(
            "product_pattern must not be empty".into(),
        ));
    }

    Regex::new(&layout.product_pattern).map_err(|e| {
        PedidosError::LayoutInvalid(format!(
            "product_pattern '{}' is not a valid regex: {}",
            layout.product_pattern, e
        ))
    })?;

    Ok(())
}

/// A validated layout with its product pattern compiled.
#[derive(Debug, Clone)]
pub struct Layout {
    config: LayoutConfig,
    product_re: Regex,
}

impl Layout {
    pub fn compile(config: LayoutConfig) -> Result<Self, PedidosError> {
        validate_layout(&config)?;
        let product_re = Regex::new(&config.product_pattern)
            .map_err(|e| PedidosError::LayoutInvalid(e.to_string()))?;
        Ok(Layout { config, product_re })
    }

    /// The layout used when no other is requested.
    pub fn default_preset() -> Result<Self, PedidosError> {
        Self::compile(builtin::load_preset(builtin::DEFAULT_PRESET)?)
    }

    pub fn with_matching(mut self, matching: MatchMode) -> Self {
        self.config.matching = matching;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn matching(&self) -> MatchMode {
        self.config.matching
    }

    /// First product code in `text`, if any.
    pub fn find_product<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.product_re.find(text).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_with(field: &str, value: &str) -> String {
        let mut v: serde_json::Value =
            serde_json::from_str(builtin::preset_json("jbgf").unwrap()).unwrap();
        v[field] = serde_json::from_str(value).unwrap();
        v.to_string()
    }

    #[test]
    fn test_parse_valid_layout() {
        let json = r#"{
            "name": "Test",
            "product_band": { "min": 10, "max": 90 },
            "quantity_band": { "min": 300, "max": 350 },
            "product_pattern": "SKU-[0-9]+",
            "page_marker": "Page",
            "row_tolerance": 4.5
        }"#;
        let layout = parse_layout_str(json).unwrap();
        assert_eq!(layout.name, "Test");
        assert_eq!(layout.row_tolerance, 4.5);
        assert_eq!(layout.matching, MatchMode::FirstWithinTolerance);
    }

    #[test]
    fn test_exclusive_matching_parses() {
        let layout = parse_layout_str(&json_with("matching", r#""exclusive""#)).unwrap();
        assert_eq!(layout.matching, MatchMode::Exclusive);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let json = json_with("product_band", r#"{ "min": 100, "max": 0 }"#);
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_overlapping_bands_rejected() {
        let json = json_with("quantity_band", r#"{ "min": 50, "max": 450 }"#);
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_touching_bands_accepted() {
        let json = json_with("quantity_band", r#"{ "min": 100, "max": 450 }"#);
        assert!(parse_layout_str(&json).is_ok());
    }

    #[test]
    fn test_non_positive_tolerance_rejected() {
        assert!(parse_layout_str(&json_with("row_tolerance", "0")).is_err());
        assert!(parse_layout_str(&json_with("row_tolerance", "-3")).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let json = json_with("product_pattern", r#""JBGF[0-9""#);
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(parse_layout_str(&json_with("page_marker", r#""""#)).is_err());
    }

    #[test]
    fn test_load_layout_reports_path() {
        let err = load_layout(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/layout.json"));
    }

    #[test]
    fn test_find_product_is_unanchored() {
        let layout = Layout::default_preset().unwrap();
        assert_eq!(layout.find_product("Item JBGF0042 blue"), Some("JBGF0042"));
        assert_eq!(layout.find_product("JBGF"), None);
        assert_eq!(layout.find_product("jbgf12"), None);
    }

    #[test]
    fn test_with_matching_overrides_config() {
        let layout = Layout::default_preset()
            .unwrap()
            .with_matching(MatchMode::Exclusive);
        assert_eq!(layout.matching(), MatchMode::Exclusive);
    }
}
