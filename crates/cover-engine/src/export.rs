//! Decoding of source images and encoding of the finished cover.

use std::io::Cursor;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::compose;
use crate::error::CoverError;
use crate::resize;

/// JPEG quality used for print output.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Suggested file name for a 270 x 150 mm cover.
pub const DEFAULT_OUTPUT_NAME: &str = "okladka_bluray_270x150.jpg";

/// Decode PNG, JPEG or WEBP bytes into an RGBA raster.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, CoverError> {
    let img = image::load_from_memory(bytes).map_err(CoverError::Decode)?;
    debug!(w = img.width(), h = img.height(), "Decoded source image");
    Ok(img.to_rgba8())
}

/// Encode the cover as an RGB JPEG carrying `dpi` as its pixel density.
///
/// Transparent areas are flattened onto white first.
pub fn encode_jpeg(canvas: &RgbaImage, dpi: u32, quality: u8) -> Result<Vec<u8>, CoverError> {
    let flat = compose::flatten_onto(canvas, Rgba([255, 255, 255, 255]));
    let rgb = DynamicImage::ImageRgba8(flat).to_rgb8();

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    let density = u16::try_from(dpi).unwrap_or(u16::MAX);
    encoder.set_pixel_density(PixelDensity::dpi(density));
    encoder.encode_image(&rgb).map_err(CoverError::Encode)?;

    debug!(
        w = rgb.width(),
        h = rgb.height(),
        dpi,
        quality,
        bytes = buf.len(),
        "Encoded cover JPEG"
    );
    Ok(buf)
}

/// Encode a downscaled PNG preview of the cover.
pub fn encode_png_preview(canvas: &RgbaImage, width: u32) -> Result<Vec<u8>, CoverError> {
    let preview = if canvas.width() > width {
        resize::resize_to_width(canvas, width)
    } else {
        canvas.clone()
    };
    let mut cursor = Cursor::new(Vec::new());
    preview
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(CoverError::Encode)?;
    Ok(cursor.into_inner())
}
