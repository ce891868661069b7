//! Immutable render configuration.
//!
//! Every field has a default matching a fresh, unedited cover, so a partial
//! JSON document deserializes into a complete configuration.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::crop::CropSpec;
use crate::fonts::{FontFamily, FontWeight};
use crate::geometry::CoverDimensions;
use crate::logo::{Corner, LogoVariant};
use crate::spine::SpineRotation;
use crate::text::{TextBlock, VAlign};

/// Back panel margin as a share of the panel width.
pub const BACK_TEXT_MARGIN_RATIO: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Exchange the front and back source images before cropping.
    pub swap: bool,
    pub spine: SpineConfig,
    pub back: BackConfig,
    pub logo: LogoConfig,
    /// Applied to whichever image ends up as the front, after `swap`.
    pub front_crop: CropSpec,
    pub back_crop: CropSpec,
    pub dimensions: CoverDimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpineConfig {
    pub color: Color,
    pub text: String,
    pub text_color: Color,
    pub font: FontFamily,
    pub bold: bool,
    pub font_size_px: u32,
    pub rotation: SpineRotation,
}

impl Default for SpineConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            text: "TYTUŁ".into(),
            text_color: Color::WHITE,
            font: FontFamily::Sans,
            bold: true,
            font_size_px: 90,
            rotation: SpineRotation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackMode {
    /// Solid color with optional multi-line text.
    #[default]
    Solid,
    /// A supplied back image.
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackConfig {
    pub mode: BackMode,
    pub color: Color,
    pub text: String,
    pub text_color: Color,
    pub font: FontFamily,
    pub bold: bool,
    pub font_size_px: u32,
    pub text_position: VAlign,
}

impl Default for BackConfig {
    fn default() -> Self {
        Self {
            mode: BackMode::Solid,
            color: Color::BLACK,
            text: String::new(),
            text_color: Color::WHITE,
            font: FontFamily::Sans,
            bold: false,
            font_size_px: 46,
            text_position: VAlign::Center,
        }
    }
}

impl BackConfig {
    /// Text block for a back panel `panel_width` pixels wide.
    pub fn text_block(&self, panel_width: u32) -> TextBlock {
        TextBlock {
            text: self.text.clone(),
            family: self.font,
            weight: FontWeight::from_bold(self.bold),
            font_size: self.font_size_px,
            color: self.text_color,
            align: self.text_position,
            margin: (f64::from(panel_width) * BACK_TEXT_MARGIN_RATIO) as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub variant: LogoVariant,
    pub on_front: bool,
    pub on_back: bool,
    pub front_corner: Corner,
    pub back_corner: Corner,
    pub max_width_mm: f64,
    pub margin_mm: f64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            variant: LogoVariant::White,
            on_front: true,
            on_back: true,
            front_corner: Corner::BottomRight,
            back_corner: Corner::BottomLeft,
            max_width_mm: 15.0,
            margin_mm: 5.0,
        }
    }
}
