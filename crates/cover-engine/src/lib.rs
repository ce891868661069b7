//! Blu-ray cover composition engine.
//!
//! Turns two panel images (or a solid back panel with text), a spine title
//! and logo placement rules into one printable raster laid out as
//! back panel | spine | front panel.

pub mod color;
pub mod compose;
pub mod config;
pub mod cover;
pub mod error;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod logo;
pub mod resize;
pub mod spine;
pub mod text;

mod crop;

// Re-exports for convenience
pub use color::Color;
pub use config::{BackConfig, BackMode, CoverConfig, LogoConfig, SpineConfig};
pub use crop::{CropSpec, crop_by_percent};
pub use cover::{CoverWarning, RenderInput, RenderOutput, render_cover};
pub use error::CoverError;
pub use export::{decode_image, encode_jpeg, encode_png_preview};
pub use fonts::{FontFamily, FontRegistry, FontWeight};
pub use geometry::{CoverDimensions, Region, clamp, mm_to_px};
pub use logo::{Corner, LogoRegistry, LogoVariant};
pub use spine::SpineRotation;
pub use text::{TextBlock, VAlign};

/// Smallest font size the shrink-to-fit loops will go down to.
pub const MIN_FONT_SIZE: u32 = 10;

/// Font size decrement per shrink-to-fit iteration.
pub const FONT_SIZE_STEP: u32 = 2;
