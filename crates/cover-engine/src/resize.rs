//! Image resizing for cover panels, logos and previews.
//!
//! All operations use Lanczos3 filtering.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Stretch an image to exactly `width` x `height`.
///
/// Horizontal and vertical scale factors are independent, so the aspect
/// ratio is not preserved. The panel is always fully covered and nothing
/// is cropped.
pub fn fit_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();

    if (orig_w, orig_h) == (width, height) {
        debug!(width, height, "Already at target size, skipping resize");
        return img.clone();
    }

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height = height,
        "Stretching image to panel size"
    );

    imageops::resize(img, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Resize an image to a target width while maintaining aspect ratio.
///
/// Returns the original image unchanged if it already matches the target width.
pub fn resize_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();

    if orig_w == width {
        debug!(width, "Image already at target width, skipping resize");
        return img.clone();
    }

    let ratio = f64::from(width) / f64::from(orig_w.max(1));
    let new_height = (f64::from(orig_h) * ratio).round() as u32;
    let new_height = new_height.max(1);

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height,
        "Resizing image to target width"
    );

    imageops::resize(img, width.max(1), new_height, FilterType::Lanczos3)
}

/// Shrink an image so its width is at most `max_width`, keeping aspect ratio.
///
/// Images already narrow enough are returned at native size, never upscaled.
/// The new height is rounded down.
pub fn shrink_to_width(img: &RgbaImage, max_width: u32) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();

    if orig_w <= max_width {
        debug!(orig_w, max_width, "Within max width, keeping native size");
        return img.clone();
    }

    let new_width = max_width.max(1);
    let new_height = (u64::from(orig_h) * u64::from(new_width) / u64::from(orig_w)) as u32;
    let new_height = new_height.max(1);

    debug!(
        orig_w,
        orig_h,
        new_width,
        new_height,
        "Shrinking image to max width"
    );

    imageops::resize(img, new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn create_test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([128, 64, 32, 255]))
    }

    #[test]
    fn fit_exact_distorts_to_target() {
        let img = create_test_image(200, 300);
        let result = fit_exact(&img, 150, 50);
        assert_eq!(result.dimensions(), (150, 50));
    }

    #[test]
    fn fit_exact_keeps_solid_color() {
        let img = RgbaImage::from_pixel(20, 30, Rgba([255, 0, 0, 255]));
        let result = fit_exact(&img, 64, 48);
        let px = result.get_pixel(32, 24);
        assert!(px[0] > 250 && px[1] < 5 && px[2] < 5, "got {px:?}");
    }

    #[test]
    fn fit_exact_same_size_is_identity() {
        let img = create_test_image(40, 30);
        assert_eq!(fit_exact(&img, 40, 30), img);
    }

    #[test]
    fn test_resize_to_width_downscale() {
        let img = create_test_image(800, 600);
        let result = resize_to_width(&img, 400);
        assert_eq!(result.dimensions(), (400, 300));
    }

    #[test]
    fn test_resize_to_width_upscale() {
        let img = create_test_image(200, 100);
        let result = resize_to_width(&img, 400);
        assert_eq!(result.dimensions(), (400, 200));
    }

    #[test]
    fn test_resize_preserves_non_zero_dimensions() {
        // Very wide, very short image
        let img = create_test_image(1000, 1);
        let result = resize_to_width(&img, 10);
        assert_eq!(result.width(), 10);
        assert!(result.height() >= 1, "Height should be at least 1");
    }

    #[test]
    fn shrink_never_upscales() {
        let img = create_test_image(100, 40);
        let result = shrink_to_width(&img, 177);
        assert_eq!(result.dimensions(), (100, 40));
    }

    #[test]
    fn shrink_hits_exact_max_width() {
        let img = create_test_image(600, 250);
        let result = shrink_to_width(&img, 177);
        assert_eq!(result.width(), 177);
        // 250 * 177 / 600 = 73.75
        assert_eq!(result.height(), 73);
    }
}
