use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::{debug, warn};

use crate::error::{AuthentixError, Result};
use crate::io::handle::{HandleTracker, SourceHandle};

/// A decoded, immutable source image plus the handle that keeps it alive.
///
/// Dropping the source releases the handle.
#[derive(Debug)]
pub struct DecodedSource {
    image: Arc<DynamicImage>,
    format: ImageFormat,
    byte_len: usize,
    handle: SourceHandle,
}

impl DecodedSource {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Shared pixels for a render job running off the owning thread.
    pub fn shared_image(&self) -> Arc<DynamicImage> {
        Arc::clone(&self.image)
    }

    pub fn handle_id(&self) -> u64 {
        self.handle.id()
    }

    pub fn info(&self) -> SourceInfo {
        SourceInfo {
            width: self.width(),
            height: self.height(),
            mime: self.format.to_mime_type(),
            byte_len: self.byte_len,
        }
    }
}

/// Metadata of a decoded source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
    pub byte_len: usize,
}

/// Decode an in-memory image file.
///
/// The content type is sniffed from the bytes. Empty input, unknown content,
/// corrupt data and unsupported formats all fail with `DecodeFailure`; the
/// temporary handle acquired for the attempt is released on every path.
pub fn decode_bytes(bytes: &[u8], tracker: &HandleTracker) -> Result<DecodedSource> {
    let handle = tracker.acquire();

    if bytes.is_empty() {
        warn!(handle = handle.id(), "Empty image file");
        return Err(AuthentixError::DecodeFailure("file is empty".into()));
    }

    let format = image::guess_format(bytes)
        .map_err(|_| AuthentixError::DecodeFailure("not an image file".into()))?;

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AuthentixError::DecodeFailure(e.to_string()))?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AuthentixError::DecodeFailure(format!(
            "image has no pixels ({width}x{height})"
        )));
    }

    debug!(
        handle = handle.id(),
        width,
        height,
        format = ?format,
        "Decoded source image"
    );

    Ok(DecodedSource {
        image: Arc::new(image),
        format,
        byte_len: bytes.len(),
        handle,
    })
}

/// Read and decode an image file from disk.
pub fn decode_file(path: &Path, tracker: &HandleTracker) -> Result<DecodedSource> {
    let bytes = std::fs::read(path)?;
    decode_bytes(&bytes, tracker)
}
