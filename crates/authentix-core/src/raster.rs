use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImage, GenericImageView, Rgb, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::{AuthentixError, Result};
use crate::geometry::{bounded_dimensions, SourceRegion};

const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Region coordinates closer than this to a whole pixel count as integral.
const INTEGRAL_EPSILON: f64 = 1e-6;

/// An integer rectangle inside the source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Snap a fractional square region to whole pixels inside `src_w×src_h`.
    pub fn from_region(region: SourceRegion, src_w: u32, src_h: u32) -> Result<Self> {
        if src_w == 0 || src_h == 0 {
            return Err(AuthentixError::InvalidDimensions {
                width: src_w,
                height: src_h,
            });
        }
        if !(region.x.is_finite() && region.y.is_finite() && region.size.is_finite()) {
            return Err(AuthentixError::RenderFailure(format!(
                "non-finite crop region {region:?}"
            )));
        }

        let size = (region.size.round() as u32).clamp(1, src_w.min(src_h));
        let x = (region.x.max(0.0).round() as u32).min(src_w - size);
        let y = (region.y.max(0.0).round() as u32).min(src_h - size);
        Ok(Self {
            x,
            y,
            width: size,
            height: size,
        })
    }
}

/// A drawing surface scoped to one render call.
struct Surface {
    buffer: RgbImage,
}

impl Surface {
    fn acquire(width: u32, height: u32, max_side: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > max_side || height > max_side {
            return Err(AuthentixError::RenderFailure(format!(
                "cannot acquire a {width}x{height} surface (limit {max_side})"
            )));
        }
        Ok(Self {
            buffer: RgbImage::new(width, height),
        })
    }

    /// Resample `rect` of `source` so it fills the whole surface.
    fn draw(&mut self, source: &DynamicImage, rect: PixelRect) -> Result<()> {
        let (out_w, out_h) = self.buffer.dimensions();
        let (src_w, src_h) = source.dimensions();
        if rect.width == 0
            || rect.height == 0
            || rect.x + rect.width > src_w
            || rect.y + rect.height > src_h
        {
            return Err(AuthentixError::RenderFailure(format!(
                "region {rect:?} exceeds source {src_w}x{src_h}"
            )));
        }

        let region = source
            .crop_imm(rect.x, rect.y, rect.width, rect.height)
            .to_rgb8();

        let drawn = if (rect.width, rect.height) == (out_w, out_h) {
            region
        } else {
            imageops::resize(&region, out_w, out_h, RESAMPLE_FILTER)
        };

        self.buffer
            .copy_from(&drawn, 0, 0)
            .map_err(|e| AuthentixError::RenderFailure(e.to_string()))
    }

    /// Resample a fractional square region so it fills the whole surface.
    ///
    /// Each output pixel covers `size / out` source pixels starting at the
    /// region's sub-pixel origin. Footprints of one pixel or more are box
    /// averaged with partial-coverage weights; smaller ones are sampled
    /// bilinearly at the output pixel centre.
    fn draw_fractional(&mut self, source: &DynamicImage, region: SourceRegion) -> Result<()> {
        let (out_w, out_h) = self.buffer.dimensions();
        let (src_w, src_h) = source.dimensions();
        let size = region.size.min(src_w.min(src_h) as f64);
        if size <= 0.0 {
            return Err(AuthentixError::RenderFailure(format!(
                "empty crop region {region:?}"
            )));
        }
        let x = region.x.clamp(0.0, src_w as f64 - size);
        let y = region.y.clamp(0.0, src_h as f64 - size);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = ((x + size).ceil() as u32).clamp(x0 + 1, src_w);
        let y1 = ((y + size).ceil() as u32).clamp(y0 + 1, src_h);
        let window = source.crop_imm(x0, y0, x1 - x0, y1 - y0).to_rgb8();

        let cols = axis_taps(x - x0 as f64, size, out_w, window.width());
        let rows = axis_taps(y - y0 as f64, size, out_h, window.height());

        // Horizontal pass over every window row, then vertical into the surface.
        let stride = out_w as usize;
        let mut horizontal = vec![[0f32; 3]; stride * window.height() as usize];
        for wy in 0..window.height() {
            for (ox, taps) in cols.iter().enumerate() {
                let mut acc = [0f32; 3];
                for &(sx, weight) in taps {
                    let px = window.get_pixel(sx, wy);
                    for c in 0..3 {
                        acc[c] += px[c] as f32 * weight;
                    }
                }
                horizontal[wy as usize * stride + ox] = acc;
            }
        }

        for (oy, taps) in rows.iter().enumerate() {
            for ox in 0..stride {
                let mut acc = [0f32; 3];
                for &(sy, weight) in taps {
                    let px = horizontal[sy as usize * stride + ox];
                    for c in 0..3 {
                        acc[c] += px[c] * weight;
                    }
                }
                let rgb = acc.map(|v| v.round().clamp(0.0, 255.0) as u8);
                self.buffer.put_pixel(ox as u32, oy as u32, Rgb(rgb));
            }
        }
        Ok(())
    }

    fn into_image(self) -> RgbImage {
        self.buffer
    }
}

/// Rasterize `rect` of `source` into a new `out_w×out_h` image in one resample.
pub fn render_rect(
    source: &DynamicImage,
    rect: PixelRect,
    out_w: u32,
    out_h: u32,
    max_side: u32,
) -> Result<RgbImage> {
    let mut surface = Surface::acquire(out_w, out_h, max_side)?;
    surface.draw(source, rect)?;
    debug!(?rect, out_w, out_h, "Rendered region");
    Ok(surface.into_image())
}

/// Rasterize a square crop region into an `out_side×out_side` image.
///
/// Whole-pixel regions go through a plain crop and resize; fractional ones
/// are resampled at their exact sub-pixel position.
pub fn render_region(
    source: &DynamicImage,
    region: SourceRegion,
    out_side: u32,
    max_side: u32,
) -> Result<RgbImage> {
    if !(region.x.is_finite() && region.y.is_finite() && region.size.is_finite()) {
        return Err(AuthentixError::RenderFailure(format!(
            "non-finite crop region {region:?}"
        )));
    }
    if is_integral(region) {
        let rect = PixelRect::from_region(region, source.width(), source.height())?;
        return render_rect(source, rect, out_side, out_side, max_side);
    }

    let mut surface = Surface::acquire(out_side, out_side, max_side)?;
    surface.draw_fractional(source, region)?;
    debug!(?region, out_side, "Rendered fractional region");
    Ok(surface.into_image())
}

fn is_integral(region: SourceRegion) -> bool {
    [region.x, region.y, region.size]
        .iter()
        .all(|v| (v - v.round()).abs() < INTEGRAL_EPSILON)
}

/// Per-output-pixel source taps along one axis, weights summing to 1.
///
/// `start` is the region origin relative to the window, `span` its length
/// and `len` the window length in source pixels.
fn axis_taps(start: f64, span: f64, out: u32, len: u32) -> Vec<Vec<(u32, f32)>> {
    let step = span / out as f64;
    let last = len.saturating_sub(1) as f64;
    (0..out)
        .map(|i| {
            let mut taps: Vec<(u32, f64)> = Vec::new();
            if step >= 1.0 {
                let a = start + i as f64 * step;
                let b = a + step;
                let mut px = a.floor().max(0.0);
                while px < b && px <= last {
                    let cover = b.min(px + 1.0) - a.max(px);
                    if cover > 0.0 {
                        taps.push((px as u32, cover));
                    }
                    px += 1.0;
                }
            } else {
                let c = start + (i as f64 + 0.5) * step - 0.5;
                let p0 = c.floor();
                let t = c - p0;
                taps.push((p0.clamp(0.0, last) as u32, 1.0 - t));
                taps.push(((p0 + 1.0).clamp(0.0, last) as u32, t));
            }

            let total: f64 = taps.iter().map(|&(_, w)| w).sum();
            if taps.is_empty() || total <= 0.0 {
                let nearest = (start + (i as f64 + 0.5) * step).floor().clamp(0.0, last);
                return vec![(nearest as u32, 1.0)];
            }
            taps.into_iter()
                .map(|(p, w)| (p, (w / total) as f32))
                .collect()
        })
        .collect()
}

/// Proportionally downscale the whole source so neither edge exceeds `bound`.
pub fn resize_bounded(source: &DynamicImage, bound: u32, max_side: u32) -> Result<RgbImage> {
    let (src_w, src_h) = source.dimensions();
    let (out_w, out_h) = bounded_dimensions(src_w, src_h, bound)?;
    render_rect(source, PixelRect::full(src_w, src_h), out_w, out_h, max_side)
}

/// RGBA copy of the source for on-screen display, shrunk to fit `max_side`.
pub fn display_raster(source: &DynamicImage, max_side: u32) -> RgbaImage {
    if source.width() <= max_side && source.height() <= max_side {
        source.to_rgba8()
    } else {
        source.thumbnail(max_side, max_side).to_rgba8()
    }
}
