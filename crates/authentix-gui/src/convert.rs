use image::RgbaImage;

/// Convert a decoded RGBA raster to an egui ColorImage.
pub fn rgba_to_color_image(raster: &RgbaImage) -> egui::ColorImage {
    let size = [raster.width() as usize, raster.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, raster.as_raw())
}
