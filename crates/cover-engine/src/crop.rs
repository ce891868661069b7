//! Percentage-based cropping of source panel images.

use image::RgbaImage;
use image::imageops;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Region, clamp};

/// Percentages (0..100) of the source dimension removed from each edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSpec {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl CropSpec {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.left == 0.0 && self.right == 0.0 && self.top == 0.0 && self.bottom == 0.0
    }

    /// Pixel rectangle kept from a `width` x `height` source.
    ///
    /// Always at least 1x1 for a non-empty source, however large the
    /// percentages are.
    pub fn region(&self, width: u32, height: u32) -> Region {
        let (left, right, clamped_x) = edges(width, self.left, self.right);
        let (top, bottom, clamped_y) = edges(height, self.top, self.bottom);

        if clamped_x || clamped_y {
            debug!(
                width,
                height,
                crop = ?self,
                "Degenerate crop region, clamping to minimal rectangle"
            );
        }

        Region::new(
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

/// Clamp one axis: start in [0, len-1], end in [start+1, len].
///
/// The flag is set when the percentages left nothing of the axis.
fn edges(len: u32, start_pct: f64, end_pct: f64) -> (i64, i64, bool) {
    let len = i64::from(len.max(1));
    let raw_start = (len as f64 * start_pct / 100.0).round() as i64;
    let raw_end = (len as f64 * (1.0 - end_pct / 100.0)).round() as i64;

    let start = clamp(raw_start, 0, len - 1);
    let end = clamp(raw_end, start + 1, len);
    (start, end, raw_end <= raw_start)
}

/// Crop `img` by the given edge percentages.
pub fn crop_by_percent(img: &RgbaImage, spec: &CropSpec) -> RgbaImage {
    if spec.is_identity() {
        return img.clone();
    }
    let r = spec.region(img.width(), img.height());
    debug!(
        src_w = img.width(),
        src_h = img.height(),
        x = r.x,
        y = r.y,
        w = r.width,
        h = r.height,
        "Cropping image"
    );
    imageops::crop_imm(img, r.x, r.y, r.width, r.height).to_image()
}
