//! Preview thumbnails.

use image::imageops::{self, FilterType};

use crate::constants::preview;

use super::Screenshot;

/// Largest size with the same aspect ratio as `width`x`height` that fits
/// inside `max_width`x`max_height`. Small images are scaled up.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fit = |value: u32, max: u32| ((value as f64 * scale).round() as u32).clamp(1, max);
    (fit(width, max_width), fit(height, max_height))
}

/// Scale a screenshot down (or up) to the preview popup's size
pub fn make_thumbnail(image: &Screenshot) -> Screenshot {
    let (width, height) = fit_within(
        image.width(),
        image.height(),
        preview::MAX_WIDTH,
        preview::MAX_HEIGHT,
    );
    if width == 0 || height == 0 {
        return Screenshot::new(0, 0);
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}
