use std::time::Duration;

use polaroid_core::config::{GalleryConfig, LayoutConfig, SimulationConfig, UploadConfig};
use polaroid_core::error::PolaroidError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_upload_defaults() {
    let c = UploadConfig::default();
    assert_eq!(c.max_files, 20);
    assert_eq!(c.max_file_size, 10 * 1024 * 1024);
    assert_eq!(c.accepted_types, vec!["image/jpeg", "image/png", "image/webp"]);
    assert!(c.accepts("image/png"));
    assert!(!c.accepts("image/gif"));
    assert!(!c.accepts("IMAGE/PNG"));
}

#[test]
fn test_simulation_defaults() {
    let c = SimulationConfig::default();
    assert_eq!(c.tick(), Duration::from_millis(200));
    assert_eq!(c.settle(), Duration::from_millis(500));
    assert_eq!(c.max_increment, 30.0);
    assert_eq!(c.success_rate, 0.9);
    assert_eq!(format!("{c}"), "tick 200 ms, settle 500 ms, +<30 pts, 90% success");
}

#[test]
fn test_layout_defaults() {
    let b = LayoutConfig::default().bounds();
    assert_eq!(b.container_width, 1200.0);
    assert_eq!(b.element_height, 264.0);
    assert_eq!(b.padding, 20.0);
}

#[test]
fn test_default_config_is_valid() {
    assert!(GalleryConfig::default().validate().is_ok());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_max_files_rejected() {
    let mut c = GalleryConfig::default();
    c.upload.max_files = 0;
    let err = c.validate().unwrap_err();
    assert!(matches!(err, PolaroidError::InvalidConfig(_)));
    assert!(err.to_string().contains("max_files"), "got: {err}");
}

#[test]
fn test_empty_accepted_types_rejected() {
    let mut c = GalleryConfig::default();
    c.upload.accepted_types.clear();
    assert!(c.validate().is_err());
}

#[test]
fn test_success_rate_out_of_range_rejected() {
    for rate in [-0.1, 1.01, f64::NAN] {
        let c = SimulationConfig {
            success_rate: rate,
            ..SimulationConfig::default()
        };
        assert!(c.validate().is_err(), "rate {rate}");
    }
}

#[test]
fn test_non_positive_increment_rejected() {
    let c = SimulationConfig {
        max_increment: 0.0,
        ..SimulationConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn test_negative_layout_rejected() {
    let mut c = GalleryConfig::default();
    c.layout.element_width = -1.0;
    assert!(matches!(
        c.validate(),
        Err(PolaroidError::InvalidBounds { .. })
    ));
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let mut c = GalleryConfig::default();
    c.upload.max_files = 5;
    c.simulation.success_rate = 0.5;
    let text = toml::to_string(&c).unwrap();
    let back: GalleryConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, c);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let text = r#"
[simulation]
tick_ms = 50
settle_ms = 10
max_increment = 25.0
success_rate = 1.0
"#;
    let c: GalleryConfig = toml::from_str(text).unwrap();
    assert_eq!(c.simulation.tick_ms, 50);
    assert_eq!(c.upload, UploadConfig::default());
    assert_eq!(c.layout, LayoutConfig::default());
}

#[test]
fn test_single_key_in_section_keeps_other_defaults() {
    let c: GalleryConfig = toml::from_str("[upload]\nmax_files = 5\n").unwrap();
    assert_eq!(c.upload.max_files, 5);
    assert_eq!(c.upload.max_file_size, 10 * 1024 * 1024);
    assert_eq!(c.upload.accepted_types, UploadConfig::default().accepted_types);

    let c: GalleryConfig = toml::from_str("[simulation]\nsuccess_rate = 1.0\n").unwrap();
    assert_eq!(c.simulation.success_rate, 1.0);
    assert_eq!(c.simulation.tick_ms, 200);

    let c: GalleryConfig = toml::from_str("[layout]\ncontainer_width = 1600.0\n").unwrap();
    assert_eq!(c.layout.container_width, 1600.0);
    assert_eq!(c.layout.element_width, 216.0);
    assert!(c.validate().is_ok());
}

#[test]
fn test_config_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polaroid.toml");
    std::fs::write(&path, toml::to_string(&GalleryConfig::default()).unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let c: GalleryConfig = toml::from_str(&text).unwrap();
    assert!(c.validate().is_ok());
    assert_eq!(c, GalleryConfig::default());
}
