use tracing::{info, warn};

use crate::config::ImagingConfig;
use crate::error::{AuthentixError, Result};
use crate::io::decode::{decode_bytes, DecodedSource};
use crate::io::encode::{encode_jpeg, EncodedImage};
use crate::io::handle::HandleTracker;
use crate::raster::resize_bounded;

/// Downscale a decoded source so neither edge exceeds `bound`, then encode.
pub fn encode_bounded(
    source: &DecodedSource,
    bound: u32,
    config: &ImagingConfig,
) -> Result<EncodedImage> {
    let raster = resize_bounded(source.image(), bound, config.max_surface_side)?;
    encode_jpeg(&raster, config.jpeg_quality)
}

/// Decode an image file and encode it as a listing photo.
///
/// The decoded source is dropped before returning, on success and failure.
pub fn process_listing_bytes(
    bytes: &[u8],
    config: &ImagingConfig,
    tracker: &HandleTracker,
) -> Result<EncodedImage> {
    let source = decode_bytes(bytes, tracker)?;
    let encoded = encode_bounded(&source, config.listing_max_side, config)?;
    info!(
        src_w = source.width(),
        src_h = source.height(),
        out_w = encoded.width,
        out_h = encoded.height,
        "Listing photo encoded"
    );
    Ok(encoded)
}

/// Ordered photos attached to a listing being created or edited.
#[derive(Clone, Debug)]
pub struct ListingPhotos {
    images: Vec<EncodedImage>,
    limit: usize,
}

impl ListingPhotos {
    pub fn new(limit: usize) -> Self {
        Self {
            images: Vec::new(),
            limit,
        }
    }

    pub fn with_config(config: &ImagingConfig) -> Self {
        Self::new(config.max_listing_images)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// True once the add-photo control should be disabled.
    pub fn is_full(&self) -> bool {
        self.images.len() >= self.limit
    }

    pub fn images(&self) -> &[EncodedImage] {
        &self.images
    }

    pub fn push(&mut self, image: EncodedImage) -> Result<()> {
        if self.is_full() {
            warn!(limit = self.limit, "Listing photo rejected, set is full");
            return Err(AuthentixError::TooManyImages { limit: self.limit });
        }
        self.images.push(image);
        Ok(())
    }

    /// Decode, downscale and append an image file.
    pub fn add_bytes(
        &mut self,
        bytes: &[u8],
        config: &ImagingConfig,
        tracker: &HandleTracker,
    ) -> Result<&EncodedImage> {
        if self.is_full() {
            return Err(AuthentixError::TooManyImages { limit: self.limit });
        }
        let encoded = process_listing_bytes(bytes, config, tracker)?;
        self.push(encoded)?;
        Ok(&self.images[self.images.len() - 1])
    }

    pub fn remove(&mut self, index: usize) -> Result<EncodedImage> {
        if index >= self.images.len() {
            return Err(AuthentixError::ImageIndexOutOfRange {
                index,
                total: self.images.len(),
            });
        }
        Ok(self.images.remove(index))
    }

    /// Data URIs in display order, ready for the listing request body.
    pub fn data_uris(&self) -> Vec<String> {
        self.images.iter().map(EncodedImage::to_data_uri).collect()
    }
}
