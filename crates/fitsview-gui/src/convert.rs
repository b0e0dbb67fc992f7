use image::RgbImage;

/// Convert a rendered RGB8 view to an egui ColorImage.
pub fn rgb_to_color_image(rgb: &RgbImage) -> egui::ColorImage {
    let size = [rgb.width() as usize, rgb.height() as usize];
    egui::ColorImage::from_rgb(size, rgb.as_raw())
}
