use crate::error::{AuthentixError, Result};

/// Region of the source image, in source pixels, that maps onto the preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Pan/scale state of the square crop preview.
///
/// The scaled image always covers the `P×P` preview (cover-fit), and the pan
/// offsets are kept inside `0..=max(0, scaled - P)` on each axis so the crop
/// window never leaves the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    source_width: u32,
    source_height: u32,
    preview_side: f64,
    scale: f64,
    scaled_width: f64,
    scaled_height: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Viewport {
    /// Cover-fit a `width×height` source into a `preview_side` square and
    /// centre the crop window.
    pub fn fit(width: u32, height: u32, preview_side: u32) -> Result<Self> {
        if width == 0 || height == 0 || preview_side == 0 {
            return Err(AuthentixError::InvalidDimensions { width, height });
        }

        let p = preview_side as f64;
        let (w, h) = (width as f64, height as f64);
        let scale = (p / w).max(p / h);

        let scaled_width = snap_to_preview(w * scale, p);
        let scaled_height = snap_to_preview(h * scale, p);

        let mut viewport = Self {
            source_width: width,
            source_height: height,
            preview_side: p,
            scale,
            scaled_width,
            scaled_height,
            pan_x: 0.0,
            pan_y: 0.0,
        };
        viewport.set_pan(
            (scaled_width - p) / 2.0,
            (scaled_height - p) / 2.0,
        );
        Ok(viewport)
    }

    pub fn source_size(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    pub fn preview_side(&self) -> f64 {
        self.preview_side
    }

    /// Display pixels per source pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scaled_width(&self) -> f64 {
        self.scaled_width
    }

    pub fn scaled_height(&self) -> f64 {
        self.scaled_height
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn max_pan_x(&self) -> f64 {
        (self.scaled_width - self.preview_side).max(0.0)
    }

    pub fn max_pan_y(&self) -> f64 {
        (self.scaled_height - self.preview_side).max(0.0)
    }

    /// Move the crop window, clamping each axis independently.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = clamp_axis(x, self.max_pan_x());
        self.pan_y = clamp_axis(y, self.max_pan_y());
    }

    /// Apply a pointer drag of `(dx, dy)` measured from the press origin.
    ///
    /// Dragging the photo right moves the window left.
    pub fn drag_from(&mut self, start_pan: (f64, f64), dx: f64, dy: f64) {
        self.set_pan(start_pan.0 - dx, start_pan.1 - dy);
    }

    /// True when the source exceeds the preview on at least one axis.
    pub fn is_large(&self) -> bool {
        self.source_width as f64 > self.preview_side || self.source_height as f64 > self.preview_side
    }

    /// True when dragging can change the crop (drives the "drag to position" hint).
    pub fn needs_repositioning(&self) -> bool {
        self.max_pan_x() > 0.0 || self.max_pan_y() > 0.0
    }

    /// Map the preview window back to source coordinates.
    pub fn source_region(&self) -> SourceRegion {
        SourceRegion {
            x: self.pan_x / self.scale,
            y: self.pan_y / self.scale,
            size: self.preview_side / self.scale,
        }
    }

    /// Visible window as texture coordinates: `[u_min, v_min, u_max, v_max]`.
    pub fn visible_uv(&self) -> [f64; 4] {
        [
            self.pan_x / self.scaled_width,
            self.pan_y / self.scaled_height,
            ((self.pan_x + self.preview_side) / self.scaled_width).min(1.0),
            ((self.pan_y + self.preview_side) / self.scaled_height).min(1.0),
        ]
    }
}

/// The binding axis must come out at exactly `p`, not a ulp either side.
fn snap_to_preview(scaled: f64, p: f64) -> f64 {
    if scaled < p || (scaled - p).abs() <= p * 1e-12 {
        p
    } else {
        scaled
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
