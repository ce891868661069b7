//! Physical-to-pixel geometry for the three-panel cover layout.

use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;

/// Convert millimeters to pixels at the given resolution, rounding to nearest.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    let px = (mm / MM_PER_INCH * f64::from(dpi)).round();
    if px <= 0.0 { 0 } else { px as u32 }
}

/// Three-way clamp. `lo` wins when `lo > hi`.
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    let v = if v > hi { hi } else { v };
    if v < lo { lo } else { v }
}

/// A pixel rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Physical size of the cover and its render resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverDimensions {
    /// Width of each of the two panels.
    pub panel_width_mm: f64,
    pub spine_width_mm: f64,
    pub height_mm: f64,
    pub dpi: u32,
}

impl Default for CoverDimensions {
    fn default() -> Self {
        Self {
            panel_width_mm: 130.0,
            spine_width_mm: 10.0,
            height_mm: 150.0,
            dpi: 300,
        }
    }
}

impl CoverDimensions {
    pub fn panel_width_px(&self) -> u32 {
        mm_to_px(self.panel_width_mm, self.dpi)
    }

    pub fn spine_width_px(&self) -> u32 {
        mm_to_px(self.spine_width_mm, self.dpi)
    }

    pub fn height_px(&self) -> u32 {
        mm_to_px(self.height_mm, self.dpi)
    }

    /// Convert a length on this cover to pixels.
    pub fn px(&self, mm: f64) -> u32 {
        mm_to_px(mm, self.dpi)
    }

    /// Full canvas size: back panel + spine + front panel.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.panel_width_px() * 2 + self.spine_width_px(),
            self.height_px(),
        )
    }

    pub fn back_region(&self) -> Region {
        Region::new(0, 0, self.panel_width_px(), self.height_px())
    }

    pub fn spine_region(&self) -> Region {
        Region::new(
            self.panel_width_px(),
            0,
            self.spine_width_px(),
            self.height_px(),
        )
    }

    pub fn front_region(&self) -> Region {
        Region::new(
            self.panel_width_px() + self.spine_width_px(),
            0,
            self.panel_width_px(),
            self.height_px(),
        )
    }
}
