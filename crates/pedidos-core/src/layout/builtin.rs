use crate::error::PedidosError;
use crate::layout::schema::LayoutConfig;
use crate::layout::validate_layout;

const JBGF_JSON: &str = include_str!("../../../../layouts/jbgf.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["jbgf"];

/// Name of the layout used when none is given.
pub const DEFAULT_PRESET: &str = "jbgf";

/// Raw JSON of a predefined layout, as shipped.
pub fn preset_json(name: &str) -> Result<&'static str, PedidosError> {
    match name {
        "jbgf" => Ok(JBGF_JSON),
        _ => Err(PedidosError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutConfig, PedidosError> {
    let layout: LayoutConfig = serde_json::from_str(preset_json(name)?)?;
    validate_layout(&layout)?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::schema::{Band, MatchMode};

    #[test]
    fn test_load_jbgf_preset() {
        let layout = load_preset("jbgf").unwrap();
        assert_eq!(layout.product_band, Band { min: 0.0, max: 100.0 });
        assert_eq!(layout.quantity_band, Band { min: 400.0, max: 450.0 });
        assert_eq!(layout.product_pattern, "JBGF[0-9]+");
        assert_eq!(layout.page_marker, "PÁGINA:");
        assert_eq!(layout.row_tolerance, 10.0);
        assert_eq!(layout.matching, MatchMode::FirstWithinTolerance);
    }

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
