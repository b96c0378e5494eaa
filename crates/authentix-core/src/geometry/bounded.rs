use crate::error::{AuthentixError, Result};

/// Output size for a proportional downscale bounded by `max_side`.
///
/// A landscape source wider than `max_side` is pinned on width; anything
/// else taller than `max_side` is pinned on height; a source already inside
/// the bound keeps its size. Never upscales.
pub fn bounded_dimensions(width: u32, height: u32, max_side: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 || max_side == 0 {
        return Err(AuthentixError::InvalidDimensions { width, height });
    }

    let max = max_side as f64;
    let (w, h) = (width as f64, height as f64);

    let dims = if width > height && width > max_side {
        (max_side, scaled_edge(h * max / w, max_side))
    } else if height > max_side {
        (scaled_edge(w * max / h, max_side), max_side)
    } else {
        (width.min(max_side), height.min(max_side))
    };
    Ok(dims)
}

fn scaled_edge(value: f64, max_side: u32) -> u32 {
    (value.round() as u32).clamp(1, max_side)
}
