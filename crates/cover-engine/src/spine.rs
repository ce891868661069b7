//! Rotated spine title rendering.
//!
//! The title is drawn horizontally into an offscreen buffer whose long side
//! equals the spine height, shrunk until it fills at most 94% of that length,
//! then rotated by a quarter turn and composited into the spine strip.

use ab_glyph::{Font, PxScale};
use image::RgbaImage;
use image::imageops;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::compose;
use crate::geometry::Region;
use crate::text::{self, measure_text_width};
use crate::{FONT_SIZE_STEP, MIN_FONT_SIZE};

/// Share of the spine length the title may occupy.
pub const SPINE_TEXT_MAX_FILL: f64 = 0.94;

/// Direction of the quarter turn applied to the horizontal title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpineRotation {
    /// Text reads top to bottom.
    Clockwise,
    /// Text reads bottom to top.
    #[default]
    CounterClockwise,
}

impl SpineRotation {
    /// Rotate an image by a quarter turn. Width and height swap.
    pub fn apply(self, img: &RgbaImage) -> RgbaImage {
        debug!(w = img.width(), h = img.height(), rotation = ?self, "Rotating spine buffer");
        match self {
            SpineRotation::Clockwise => imageops::rotate90(img),
            SpineRotation::CounterClockwise => imageops::rotate270(img),
        }
    }
}

/// Largest size, starting at `requested`, at which `text` is no wider than
/// `max_len`. Falls back to [`MIN_FONT_SIZE`] when nothing fits.
pub fn fit_font_size<F: Font>(font: &F, text: &str, requested: u32, max_len: u32) -> u32 {
    let mut size = requested.max(1);
    loop {
        let width = measure_text_width(font, PxScale::from(size as f32), text);
        if width <= max_len || size <= MIN_FONT_SIZE {
            return size;
        }
        size = size.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE);
    }
}

/// Draw `title` rotated into the `spine` rectangle of `canvas`.
///
/// Returns the font size used, or `None` when the title is blank.
pub fn draw_spine_text<F: Font>(
    canvas: &mut RgbaImage,
    spine: Region,
    title: &str,
    color: Color,
    font: &F,
    font_size: u32,
    rotation: SpineRotation,
) -> Option<u32> {
    let title = title.trim();
    if title.is_empty() || spine.width == 0 || spine.height == 0 {
        return None;
    }

    // Horizontal buffer: long side is the spine height.
    let (length, thickness) = (spine.height, spine.width);
    let mut buffer = RgbaImage::new(length, thickness);

    let max_len = (f64::from(length) * SPINE_TEXT_MAX_FILL) as u32;
    let size = fit_font_size(font, title, font_size, max_len);
    let scale = PxScale::from(size as f32);

    let text_w = measure_text_width(font, scale, title);
    let text_h = text::text_height(font, scale);
    let x = (i64::from(length) - i64::from(text_w)).div_euclid(2);
    let y = (i64::from(thickness) - i64::from(text_h)).div_euclid(2);
    text::draw_text_line(
        &mut buffer,
        font,
        scale,
        x as i32,
        y as i32,
        title,
        color.to_rgba(),
    );

    // Antialiased edges were blended against transparent black; restore the
    // fill color so only alpha carries coverage.
    for p in buffer.pixels_mut() {
        if p[3] > 0 {
            p[0] = color.r;
            p[1] = color.g;
            p[2] = color.b;
        }
    }

    let rotated = rotation.apply(&buffer);

    let mut strip = RgbaImage::new(spine.width, spine.height);
    let ox = (i64::from(strip.width()) - i64::from(rotated.width())).div_euclid(2);
    let oy = (i64::from(strip.height()) - i64::from(rotated.height())).div_euclid(2);
    compose::overlay(&mut strip, &rotated, ox, oy);
    compose::overlay(canvas, &strip, i64::from(spine.x), i64::from(spine.y));

    debug!(
        requested = font_size,
        font_size = size,
        text_w,
        max_len,
        "Spine text rendered"
    );
    Some(size)
}
