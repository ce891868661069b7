use std::path::PathBuf;

use crate::logo::LogoVariant;

/// Errors that can occur while building a cover.
///
/// Only [`CoverError::Decode`] on the front image aborts a render. Logo and
/// font failures are recovered by the pipeline and reported as warnings or
/// replaced by the fallback font.
#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("Invalid color format: {0:?} (expected 6 hex digits, optional leading '#')")]
    InvalidColorFormat(String),

    #[error("Logo asset for variant '{variant}' not found at {}", path.display())]
    LogoAssetMissing { variant: LogoVariant, path: PathBuf },

    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoadFailure { path: PathBuf, reason: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
