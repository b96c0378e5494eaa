#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Build an RGB image whose pixels encode their own coordinates.
///
/// Red ramps along x, green along y, blue is constant, so a crop can be
/// located by sampling a few pixels.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(2).saturating_sub(1).max(1)).min(255) as u8;
        let g = (y * 255 / height.max(2).saturating_sub(1).max(1)).min(255) as u8;
        Rgb([r, g, 128])
    })
}

/// Encode an RGB image into an in-memory file of the given format.
pub fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut buf, format)
        .expect("encode test image");
    buf.into_inner()
}

/// PNG file bytes of a `width×height` gradient.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient_image(width, height), ImageFormat::Png)
}

/// Decode JPEG bytes produced by the encoder under test.
pub fn decode_jpeg(bytes: &[u8]) -> RgbImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .expect("decode JPEG output")
        .to_rgb8()
}

/// Mean absolute per-channel difference between two equally sized images.
pub fn mean_abs_diff(a: &RgbImage, b: &RgbImage) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions());
    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| (x as i16 - y as i16).unsigned_abs() as u64)
        .sum();
    total as f64 / a.as_raw().len() as f64
}
