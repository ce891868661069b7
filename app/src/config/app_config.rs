//! Runtime configuration loaded from a JSON file + environment overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cover_engine::export::DEFAULT_JPEG_QUALITY;
use cover_engine::fonts::DEFAULT_FONT_DIR;
use cover_engine::{Color, CoverConfig, LogoVariant};

use super::defaults::{DEFAULT_LOGO_DIR, ENV_SETTINGS, env_keys};
use super::validation::{validate_cover, validate_setting};

/// Everything a render run needs besides the source images.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub cover: CoverConfig,
    pub font_dir: PathBuf,
    pub logo_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cover: CoverConfig::default(),
            font_dir: PathBuf::from(DEFAULT_FONT_DIR),
            logo_dir: PathBuf::from(DEFAULT_LOGO_DIR),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (if any), then apply `COVER_*`
    /// environment overrides and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = Self {
            cover: match path {
                Some(p) => read_cover_config(p)?,
                None => CoverConfig::default(),
            },
            ..Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`. Invalid values are logged and skipped;
    /// the returned messages describe each skipped override.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut rejected = Vec::new();
        for key in env_keys() {
            let Some(value) = lookup(key) else { continue };
            let result = validate_setting(key, &value);
            match result.and_then(|()| self.apply(key, &value)) {
                Ok(()) => tracing::debug!("Applied override {key}"),
                Err(e) => {
                    let description = ENV_SETTINGS.get(key).map_or("", |def| def.description);
                    let msg = format!("Ignoring {key}={value:?} ({description}): {e}");
                    tracing::warn!("{msg}");
                    rejected.push(msg);
                }
            }
        }
        rejected
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), String> {
        let cover = &mut self.cover;
        match key {
            "COVER_SWAP" => cover.swap = value == "true",
            "COVER_SPINE_TEXT" => cover.spine.text = value.to_string(),
            "COVER_SPINE_COLOR" => cover.spine.color = parse_color(value)?,
            "COVER_BACK_TEXT" => cover.back.text = value.replace("\\n", "\n"),
            "COVER_BACK_COLOR" => cover.back.color = parse_color(value)?,
            "COVER_LOGO_VARIANT" => cover.logo.variant = parse_variant(value)?,
            "COVER_DPI" => cover.dimensions.dpi = parse_num(value)?,
            "COVER_JPEG_QUALITY" => self.jpeg_quality = parse_num(value)?,
            "COVER_LOGO_DIR" => self.logo_dir = PathBuf::from(value),
            "COVER_FONT_DIR" => self.font_dir = PathBuf::from(value),
            _ => {}
        }
        Ok(())
    }

    /// Check the merged configuration against the editor's limits.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validate_cover(&self.cover)
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))
    }
}

fn read_cover_config(path: &Path) -> Result<CoverConfig, anyhow::Error> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let cover = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    tracing::info!("Loaded cover config from {}", path.display());
    Ok(cover)
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse::<Color>().map_err(|e| e.to_string())
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("{s:?} is out of range"))
}

fn parse_variant(s: &str) -> Result<LogoVariant, String> {
    LogoVariant::ALL
        .into_iter()
        .find(|v| v.to_string() == s)
        .ok_or_else(|| format!("unknown logo variant {s:?}"))
}
