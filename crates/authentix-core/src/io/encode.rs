use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::debug;

use crate::consts::OUTPUT_MIME;
use crate::error::{AuthentixError, Result};

/// A JPEG-compressed output raster.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// `data:image/jpeg;base64,...` form sent inline in request bodies.
    pub fn to_data_uri(&self) -> String {
        format!("data:{OUTPUT_MIME};base64,{}", STANDARD.encode(&self.bytes))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "Encoded image saved");
        Ok(())
    }
}

/// Compress an RGB raster as baseline JPEG.
pub fn encode_jpeg(raster: &RgbImage, quality: u8) -> Result<EncodedImage> {
    let (width, height) = raster.dimensions();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .encode_image(raster)
        .map_err(|e| AuthentixError::RenderFailure(format!("JPEG encoding failed: {e}")))?;

    debug!(width, height, quality, bytes = bytes.len(), "Encoded JPEG");
    Ok(EncodedImage {
        bytes,
        width,
        height,
    })
}

/// Split a base64 data URI into its MIME type and payload bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AuthentixError::InvalidDataUri("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AuthentixError::InvalidDataUri("missing payload separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AuthentixError::InvalidDataUri("payload is not base64".into()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AuthentixError::InvalidDataUri(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}
