//! Blu-ray logo variants and corner-anchored placement.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compose;
use crate::error::CoverError;
use crate::geometry::Region;
use crate::resize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoVariant {
    #[default]
    White,
    Black,
    Blue,
}

impl LogoVariant {
    pub const ALL: [LogoVariant; 3] = [LogoVariant::White, LogoVariant::Black, LogoVariant::Blue];

    pub fn file_name(self) -> &'static str {
        match self {
            LogoVariant::White => "bluray_white.png",
            LogoVariant::Black => "bluray_black.png",
            LogoVariant::Blue => "bluray_blue.png",
        }
    }
}

impl fmt::Display for LogoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogoVariant::White => "white",
            LogoVariant::Black => "black",
            LogoVariant::Blue => "blue",
        })
    }
}

/// Corner of a panel a logo is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Logo images keyed by variant, read once from a logo directory.
#[derive(Debug, Clone, Default)]
pub struct LogoRegistry {
    dir: PathBuf,
    logos: HashMap<LogoVariant, RgbaImage>,
}

impl LogoRegistry {
    /// Load every variant present in `dir`. Missing or unreadable files are
    /// logged and reported later by [`LogoRegistry::get`].
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut logos = HashMap::new();

        for variant in LogoVariant::ALL {
            let path = dir.join(variant.file_name());
            match image::open(&path) {
                Ok(img) => {
                    debug!(%variant, path = %path.display(), "Loaded logo");
                    logos.insert(variant, img.to_rgba8());
                }
                Err(e) => warn!(%variant, path = %path.display(), "Logo unavailable: {e}"),
            }
        }

        Self { dir, logos }
    }

    /// Registry backed by in-memory images.
    pub fn from_images(images: impl IntoIterator<Item = (LogoVariant, RgbaImage)>) -> Self {
        Self {
            dir: PathBuf::new(),
            logos: images.into_iter().collect(),
        }
    }

    pub fn get(&self, variant: LogoVariant) -> Result<&RgbaImage, CoverError> {
        self.logos
            .get(&variant)
            .ok_or_else(|| CoverError::LogoAssetMissing {
                variant,
                path: self.dir.join(variant.file_name()),
            })
    }
}

/// Where and how large a logo goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub max_width: u32,
    pub margin: u32,
    pub region: Region,
    pub corner: Corner,
}

/// Downscale a logo to `max_width` if it is wider, never upscaling.
pub fn fit_logo(logo: &RgbaImage, max_width: u32) -> RgbaImage {
    resize::shrink_to_width(logo, max_width)
}

/// Top-left paste position of a `logo_w` x `logo_h` logo.
pub fn logo_origin(
    region: Region,
    logo_w: u32,
    logo_h: u32,
    corner: Corner,
    margin: u32,
) -> (i64, i64) {
    let margin = i64::from(margin);
    let x = if corner.is_left() {
        i64::from(region.x) + margin
    } else {
        i64::from(region.right()) - i64::from(logo_w) - margin
    };
    let y = if corner.is_top() {
        i64::from(region.y) + margin
    } else {
        i64::from(region.bottom()) - i64::from(logo_h) - margin
    };
    (x, y)
}

/// Fit `logo` and alpha-composite it onto `canvas` at the placement corner.
pub fn place_logo(canvas: &mut RgbaImage, logo: &RgbaImage, at: &LogoPlacement) {
    let fitted = fit_logo(logo, at.max_width);
    let (x, y) = logo_origin(
        at.region,
        fitted.width(),
        fitted.height(),
        at.corner,
        at.margin,
    );
    debug!(
        x,
        y,
        w = fitted.width(),
        h = fitted.height(),
        corner = ?at.corner,
        "Placing logo"
    );
    compose::overlay(canvas, &fitted, x, y);
}
