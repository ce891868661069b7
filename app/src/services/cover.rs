//! Cover service: loads assets once and turns source files into cover files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cover_engine::config::BackMode;
use cover_engine::{
    CoverConfig, FontRegistry, LogoRegistry, RenderInput, RenderOutput, decode_image, encode_jpeg,
    encode_png_preview, render_cover,
};

use crate::config::AppConfig;

/// Source images for a single cover.
#[derive(Debug, Clone)]
pub struct CoverSources {
    pub front: PathBuf,
    pub back: Option<PathBuf>,
}

/// Where to write the results.
#[derive(Debug, Clone)]
pub struct CoverTargets {
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
    pub preview_width: u32,
}

/// Holds the shared, read-only font and logo assets.
pub struct CoverService {
    fonts: FontRegistry,
    logos: LogoRegistry,
    jpeg_quality: u8,
}

impl CoverService {
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!(
            "Loading fonts from {} and logos from {}",
            config.font_dir.display(),
            config.logo_dir.display()
        );
        Self::with_assets(
            FontRegistry::load(&config.font_dir),
            LogoRegistry::load(&config.logo_dir),
            config.jpeg_quality,
        )
    }

    pub fn with_assets(fonts: FontRegistry, logos: LogoRegistry, jpeg_quality: u8) -> Self {
        Self {
            fonts,
            logos,
            jpeg_quality,
        }
    }

    /// Decode the sources and render the cover in memory.
    ///
    /// Supplying a back image switches the back panel to image mode.
    pub fn render(
        &self,
        cover: &CoverConfig,
        sources: &CoverSources,
    ) -> Result<RenderOutput, anyhow::Error> {
        let mut cover = cover.clone();
        let mut input = RenderInput::new(read_image(&sources.front)?);
        if let Some(back) = &sources.back {
            input = input.with_back(read_image(back)?);
            cover.back.mode = BackMode::Image;
        } else {
            cover.back.mode = BackMode::Solid;
        }

        let output = render_cover(input, &cover, &self.fonts, &self.logos);
        for warning in &output.warnings {
            tracing::warn!("{warning}");
        }
        Ok(output)
    }

    /// Render and write the JPEG (and optional PNG preview).
    pub fn render_to_files(
        &self,
        cover: &CoverConfig,
        sources: &CoverSources,
        targets: &CoverTargets,
    ) -> Result<RenderOutput, anyhow::Error> {
        let output = self.render(cover, sources)?;

        let jpeg = encode_jpeg(&output.canvas, cover.dimensions.dpi, self.jpeg_quality)?;
        write_file(&targets.output, &jpeg)?;
        tracing::info!(
            "Wrote {} ({}x{} px, {} dpi)",
            targets.output.display(),
            output.canvas.width(),
            output.canvas.height(),
            cover.dimensions.dpi
        );

        if let Some(preview_path) = &targets.preview {
            let png = encode_png_preview(&output.canvas, targets.preview_width)?;
            write_file(preview_path, &png)?;
            tracing::info!("Wrote preview {}", preview_path.display());
        }

        Ok(output)
    }
}

fn read_image(path: &Path) -> Result<image::RgbaImage, anyhow::Error> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    decode_image(&bytes)
        .with_context(|| format!("Failed to decode image {}", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))
}
