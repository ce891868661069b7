//! Text measurement, word wrapping and shrink-to-fit layout.
//!
//! The back panel text is laid out by [`fit_text`]: lines are wrapped
//! greedily at word boundaries and the font size is reduced in steps of
//! [`FONT_SIZE_STEP`] until the whole block fits inside the margin box, or
//! [`MIN_FONT_SIZE`] is reached. At the floor the layout is accepted even if
//! it overflows.

use ab_glyph::{Font, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::fonts::{FontFamily, FontRegistry, FontWeight};
use crate::{FONT_SIZE_STEP, MIN_FONT_SIZE};

/// Smallest gap between wrapped lines, in pixels.
pub const MIN_LINE_GAP: u32 = 4;

/// Vertical placement of a text block inside its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Full line height (ascent to descent, no line gap).
pub fn text_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil() as u32
}

/// Ink extent of one line: offset of the topmost inked row below the line
/// top, and the inked height.
///
/// Glyphs sit on the baseline at `ascent`, as `draw_text_mut` places them.
/// Lines without ink (blank or spaces only) take the full [`text_height`].
pub fn line_extent<F: Font>(font: &F, scale: PxScale, text: &str) -> (i32, u32) {
    let scaled = font.as_scaled(scale);
    let mut top = f32::MAX;
    let mut bottom = f32::MIN;

    for ch in text.chars() {
        let glyph = scaled
            .glyph_id(ch)
            .with_scale_and_position(scale, point(0.0, scaled.ascent()));
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            top = top.min(bounds.min.y);
            bottom = bottom.max(bounds.max.y);
        }
    }

    if bottom > top {
        (top as i32, (bottom - top) as u32)
    } else {
        (0, text_height(font, scale))
    }
}

/// Gap inserted between consecutive lines: 20% of the font size, at least 4px.
pub fn line_gap(font_size: u32) -> u32 {
    (font_size / 5).max(MIN_LINE_GAP)
}

/// Wrap text to fit within `max_width` pixels.
///
/// Explicit newlines always break. Blank input lines are kept as empty
/// lines. Words are never split, so a word wider than `max_width` ends up
/// alone on an overflowing line.
pub fn wrap_text<F: Font>(font: &F, scale: PxScale, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure_text_width(font, scale, &candidate) <= max_width {
                current = candidate;
            } else {
                if !current.is_empty() {
                    lines.push(current);
                }
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// One wrapped line with its measured size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub width: u32,
    /// Inked height of this line.
    pub height: u32,
    /// Distance from the drawing origin down to the first inked row.
    pub ink_top: i32,
}

/// A wrapped text block at a chosen font size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    pub font_size: u32,
    pub lines: Vec<TextLine>,
    pub gap: u32,
    /// Width of the widest line.
    pub block_width: u32,
    pub block_height: u32,
    /// Whether the block fits the box it was fitted to.
    pub fits: bool,
}

impl TextLayout {
    /// Top-left corner of every line's ink box for a box of `box_w` x `box_h`
    /// with the given margin. Lines are centered horizontally.
    pub fn line_origins(
        &self,
        box_w: u32,
        box_h: u32,
        margin: u32,
        align: VAlign,
    ) -> Vec<(i32, i32)> {
        let box_h = i64::from(box_h);
        let block_h = i64::from(self.block_height);
        let margin = i64::from(margin);

        let mut y = match align {
            VAlign::Top => margin,
            VAlign::Bottom => box_h - margin - block_h,
            VAlign::Center => (box_h - block_h).div_euclid(2),
        };

        let mut origins = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let x = (i64::from(box_w) - i64::from(line.width)).div_euclid(2);
            origins.push((x as i32, y as i32));
            y += i64::from(line.height) + i64::from(self.gap);
        }
        origins
    }
}

/// Wrap `text` at a fixed font size and measure the resulting block.
pub fn layout_text<F: Font>(font: &F, text: &str, font_size: u32, max_width: u32) -> TextLayout {
    let scale = PxScale::from(font_size as f32);
    let gap = line_gap(font_size);

    let lines: Vec<TextLine> = wrap_text(font, scale, text, max_width)
        .into_iter()
        .map(|text| {
            let (ink_top, height) = line_extent(font, scale, &text);
            TextLine {
                width: measure_text_width(font, scale, &text),
                height,
                ink_top,
                text,
            }
        })
        .collect();

    let block_width = lines.iter().map(|l| l.width).max().unwrap_or(0);
    let block_height = lines.iter().map(|l| l.height).sum::<u32>()
        + gap * (lines.len() as u32).saturating_sub(1);

    TextLayout {
        font_size,
        lines,
        gap,
        block_width,
        block_height,
        fits: block_width <= max_width,
    }
}

/// Find the largest font size, starting at `base_size`, whose layout fits a
/// `max_width` x `max_height` box.
///
/// The size drops by [`FONT_SIZE_STEP`] per attempt. Once [`MIN_FONT_SIZE`]
/// is reached that layout is returned even when it overflows. A base size
/// at or below the floor is used unchanged.
pub fn fit_text<F: Font>(
    font: &F,
    text: &str,
    base_size: u32,
    max_width: u32,
    max_height: u32,
) -> TextLayout {
    let mut size = base_size.max(1);
    loop {
        let mut layout = layout_text(font, text, size, max_width);
        layout.fits = layout.block_width <= max_width && layout.block_height <= max_height;

        if layout.fits || size <= MIN_FONT_SIZE {
            debug!(
                base_size,
                font_size = size,
                lines = layout.lines.len(),
                fits = layout.fits,
                "Text fitted"
            );
            return layout;
        }
        size = size.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE);
    }
}

/// Draw `text` with its left edge at `x` and line top at `y`.
pub fn draw_text_line<F: Font>(
    img: &mut RgbaImage,
    font: &F,
    scale: PxScale,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    if text.is_empty() {
        return;
    }
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Multi-line text to render into a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub family: FontFamily,
    pub weight: FontWeight,
    pub font_size: u32,
    pub color: Color,
    pub align: VAlign,
    /// Distance kept from every panel edge.
    pub margin: u32,
}

/// Fit and draw a text block onto `panel`, centering each line.
///
/// Returns the layout that was drawn, or `None` for blank text.
pub fn draw_text_block(
    panel: &mut RgbaImage,
    fonts: &FontRegistry,
    block: &TextBlock,
) -> Option<TextLayout> {
    let text = block.text.trim_matches('\n');
    if text.trim().is_empty() {
        return None;
    }

    let font = fonts.font(block.family, block.weight);
    let max_w = panel.width().saturating_sub(2 * block.margin);
    let max_h = panel.height().saturating_sub(2 * block.margin);

    let layout = fit_text(&font, text, block.font_size, max_w, max_h);
    let scale = PxScale::from(layout.font_size as f32);
    let origins = layout.line_origins(panel.width(), panel.height(), block.margin, block.align);
    let color = block.color.to_rgba();

    for (line, (x, y)) in layout.lines.iter().zip(origins) {
        let y = y - line.ink_top;
        draw_text_line(panel, &font, scale, x, y, &line.text, color);
    }

    Some(layout)
}
