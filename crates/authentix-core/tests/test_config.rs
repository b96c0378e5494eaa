use std::path::PathBuf;

use authentix_core::config::{AppConfig, ImagingConfig};
use authentix_core::consts::{
    JPEG_QUALITY, LISTING_IMAGE_MAX_SIZE, PREVIEW_SIDE, PROFILE_IMAGE_MAX_SIZE, PROFILE_OUTPUT_SIDE,
};
use authentix_core::error::AuthentixError;

#[test]
fn test_defaults_match_constants() {
    let c = ImagingConfig::default();
    assert_eq!(c.listing_max_side, LISTING_IMAGE_MAX_SIZE);
    assert_eq!(c.jpeg_quality, JPEG_QUALITY);
    assert_eq!(c.preview_side, PREVIEW_SIDE);
    assert_eq!(c.profile_output_side, PROFILE_OUTPUT_SIDE);
    assert_eq!(c.profile_max_side, PROFILE_IMAGE_MAX_SIZE);
    assert_eq!(c.max_listing_images, 10);
    assert!(c.validate().is_ok());
}

#[test]
fn test_default_config_toml_round_trip() {
    let config = AppConfig::default();
    let text = config.to_toml().unwrap();
    assert!(text.contains("[imaging]"));
    assert!(text.contains("listing_max_side = 800"));
    let parsed: AppConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("authentix.toml");
    std::fs::write(&path, "[imaging]\njpeg_quality = 70\n").unwrap();

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.imaging.jpeg_quality, 70);
    assert_eq!(config.imaging.listing_max_side, 800);
    assert_eq!(config.store.path, PathBuf::from("authentix-store.toml"));
}

#[test]
fn test_invalid_values_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");

    std::fs::write(&path, "[imaging]\njpeg_quality = 0\n").unwrap();
    assert!(matches!(AppConfig::load(&path), Err(AuthentixError::Config(_))));

    std::fs::write(&path, "[imaging]\npreview_side = 0\n").unwrap();
    assert!(matches!(AppConfig::load(&path), Err(AuthentixError::Config(_))));

    std::fs::write(&path, "[imaging\n").unwrap();
    assert!(matches!(AppConfig::load(&path), Err(AuthentixError::Config(_))));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        AppConfig::load(&dir.path().join("absent.toml")),
        Err(AuthentixError::Io(_))
    ));
}
