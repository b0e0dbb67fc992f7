use tempfile::tempdir;

use fitsview_core::config::ViewerConfig;
use fitsview_core::crop::CropOptions;
use fitsview_core::error::FitsViewError;
use fitsview_core::normalize::{NormalizationState, ScaleMode};
use fitsview_core::render::Colormap;
use fitsview_core::roi::DisplayOrigin;

#[test]
fn test_default_config() {
    let c = ViewerConfig::default();
    assert_eq!(c.normalization, NormalizationState::default());
    assert_eq!(c.colormap, Colormap::Rainbow);
    assert_eq!(c.origin, DisplayOrigin::Lower);
    assert!(!c.export.shift_reference_pixel);
}

#[test]
fn test_toml_roundtrip() {
    let c = ViewerConfig {
        normalization: NormalizationState {
            mode: ScaleMode::Log,
            vmin_percentile: 0.5,
            vmax_percentile: 99.5,
        },
        colormap: Colormap::Gray,
        origin: DisplayOrigin::Upper,
        export: CropOptions {
            shift_reference_pixel: true,
        },
    };
    let text = c.to_toml_string().unwrap();
    assert!(text.contains("[normalization]"));
    assert_eq!(ViewerConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let c = ViewerConfig::from_toml_str(
        r#"
colormap = "Gray"

[normalization]
mode = "Log"
"#,
    )
    .unwrap();
    assert_eq!(c.colormap, Colormap::Gray);
    assert_eq!(c.normalization.mode, ScaleMode::Log);
    assert_eq!(c.normalization.vmin_percentile, 5.0);
    assert_eq!(c.normalization.vmax_percentile, 95.0);
    assert_eq!(c.origin, DisplayOrigin::Lower);
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(ViewerConfig::from_toml_str("").unwrap(), ViewerConfig::default());
}

#[test]
fn test_invalid_toml() {
    let err = ViewerConfig::from_toml_str("colormap = \"Viridis\"").unwrap_err();
    assert!(matches!(err, FitsViewError::Config(_)));

    let err = ViewerConfig::from_toml_str("[normalization]\nvmax_percentile = 120.0").unwrap_err();
    assert!(matches!(err, FitsViewError::PercentileOutOfRange(_)));

    let err = ViewerConfig::from_toml_str("[normalization]\nvmin_percentile = 90.0\nvmax_percentile = 10.0")
        .unwrap_err();
    assert!(matches!(err, FitsViewError::PercentileOrder { .. }));
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fitsview.toml");
    let c = ViewerConfig {
        colormap: Colormap::Gray,
        ..ViewerConfig::default()
    };
    c.save(&path).unwrap();
    assert_eq!(ViewerConfig::load(&path).unwrap(), c);
}

#[test]
fn test_json_serialization() {
    let json = serde_json::to_value(ViewerConfig::default()).unwrap();
    assert_eq!(json["normalization"]["mode"], "Linear");
    assert_eq!(json["normalization"]["vmin_percentile"], 5.0);
    assert_eq!(json["colormap"], "Rainbow");
    assert_eq!(json["origin"], "Lower");
    assert_eq!(json["export"]["shift_reference_pixel"], false);

    let back: ViewerConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, ViewerConfig::default());
}
