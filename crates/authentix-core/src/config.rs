use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    JPEG_QUALITY, LISTING_IMAGE_MAX_SIZE, MAX_LISTING_IMAGES, MAX_SURFACE_SIDE, PREVIEW_SIDE,
    PROFILE_IMAGE_MAX_SIZE, PROFILE_OUTPUT_SIDE,
};
use crate::error::{AuthentixError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub imaging: ImagingConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Read a TOML config file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| AuthentixError::Config(format!("{}: {e}", path.display())))?;
        config.imaging.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AuthentixError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagingConfig {
    /// Longest edge of a listing photo.
    pub listing_max_side: u32,
    /// JPEG quality in 1..=100.
    pub jpeg_quality: u8,
    /// Side of the square crop preview.
    pub preview_side: u32,
    /// Side of the square profile photo.
    pub profile_output_side: u32,
    /// Longest edge of a profile photo uploaded without cropping.
    pub profile_max_side: u32,
    pub max_listing_images: usize,
    pub max_surface_side: u32,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            listing_max_side: LISTING_IMAGE_MAX_SIZE,
            jpeg_quality: JPEG_QUALITY,
            preview_side: PREVIEW_SIDE,
            profile_output_side: PROFILE_OUTPUT_SIDE,
            profile_max_side: PROFILE_IMAGE_MAX_SIZE,
            max_listing_images: MAX_LISTING_IMAGES,
            max_surface_side: MAX_SURFACE_SIDE,
        }
    }
}

impl ImagingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(AuthentixError::Config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        for (name, side) in [
            ("listing_max_side", self.listing_max_side),
            ("preview_side", self.preview_side),
            ("profile_output_side", self.profile_output_side),
            ("profile_max_side", self.profile_max_side),
        ] {
            if side == 0 || side > self.max_surface_side {
                return Err(AuthentixError::Config(format!(
                    "{name} must be in 1..={}, got {side}",
                    self.max_surface_side
                )));
            }
        }
        if self.max_listing_images == 0 {
            return Err(AuthentixError::Config(
                "max_listing_images must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// TOML file backing the persisted key-value store.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("authentix-store.toml"),
        }
    }
}
