//! Font family registry with an embedded fallback font.
//!
//! Families map to a (regular, bold) pair of font files inside a font
//! directory. The registry is built once and is read-only afterwards, so a
//! single instance can be shared by every render.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use ab_glyph::FontArc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoverError;

/// Default location of the DejaVu family on Debian-like systems.
pub const DEFAULT_FONT_DIR: &str = "/usr/share/fonts/truetype/dejavu";

static FALLBACK_FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

static FALLBACK_FONT: LazyLock<FontArc> = LazyLock::new(|| {
    FontArc::try_from_slice(FALLBACK_FONT_DATA).expect("embedded fallback font is valid")
});

/// The built-in font used whenever a configured font file cannot be loaded.
pub fn fallback_font() -> FontArc {
    FALLBACK_FONT.clone()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Sans, FontFamily::Serif, FontFamily::Mono];

    /// (regular, bold) file names.
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            FontFamily::Sans => ("DejaVuSans.ttf", "DejaVuSans-Bold.ttf"),
            FontFamily::Serif => ("DejaVuSerif.ttf", "DejaVuSerif-Bold.ttf"),
            FontFamily::Mono => ("DejaVuSansMono.ttf", "DejaVuSansMono-Bold.ttf"),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FontFamily::Sans => "Sans (DejaVu)",
            FontFamily::Serif => "Serif (DejaVu)",
            FontFamily::Mono => "Mono (DejaVu)",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    pub fn from_bold(bold: bool) -> Self {
        if bold { FontWeight::Bold } else { FontWeight::Regular }
    }
}

/// Read and parse a single font file.
pub fn load_font_file(path: &Path) -> Result<FontArc, CoverError> {
    let data = std::fs::read(path).map_err(|e| CoverError::FontLoadFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontArc::try_from_vec(data).map_err(|e| CoverError::FontLoadFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolved fonts for every family/weight combination.
#[derive(Clone)]
pub struct FontRegistry {
    fonts: HashMap<(FontFamily, FontWeight), FontArc>,
}

impl FontRegistry {
    /// Load every family from `dir`, substituting the fallback font for any
    /// file that is missing or unreadable.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut fonts = HashMap::new();

        for family in FontFamily::ALL {
            let (regular, bold) = family.file_names();
            for (weight, file) in [(FontWeight::Regular, regular), (FontWeight::Bold, bold)] {
                let path = dir.join(file);
                let font = match load_font_file(&path) {
                    Ok(font) => {
                        debug!(path = %path.display(), "Loaded font");
                        font
                    }
                    Err(e) => {
                        warn!("{e}; using built-in fallback font");
                        fallback_font()
                    }
                };
                fonts.insert((family, weight), font);
            }
        }

        Self { fonts }
    }

    /// Registry where every family resolves to the built-in font.
    pub fn fallback_only() -> Self {
        let fonts = FontFamily::ALL
            .into_iter()
            .flat_map(|f| [(f, FontWeight::Regular), (f, FontWeight::Bold)])
            .map(|key| (key, fallback_font()))
            .collect();
        Self { fonts }
    }

    pub fn font(&self, family: FontFamily, weight: FontWeight) -> FontArc {
        self.fonts
            .get(&(family, weight))
            .cloned()
            .unwrap_or_else(fallback_font)
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::fallback_only()
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("entries", &self.fonts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn fallback_font_has_latin_glyphs() {
        let font = fallback_font();
        assert_ne!(font.glyph_id('A').0, 0);
        assert_ne!(font.glyph_id('Ł').0, 0);
    }

    #[test]
    fn missing_font_file_is_reported() {
        let err = load_font_file(Path::new("/nonexistent/dir/font.ttf")).unwrap_err();
        assert!(matches!(err, CoverError::FontLoadFailure { .. }));
    }

    #[test]
    fn registry_with_missing_dir_falls_back_silently() {
        let registry = FontRegistry::load("/nonexistent/font/dir");
        for family in FontFamily::ALL {
            let font = registry.font(family, FontWeight::Bold);
            assert_ne!(font.glyph_id('T').0, 0);
        }
    }

    #[test]
    fn family_serde_names() {
        let f: FontFamily = serde_json::from_str("\"serif\"").unwrap();
        assert_eq!(f, FontFamily::Serif);
        let json = serde_json::to_string(&FontFamily::Mono).unwrap();
        assert_eq!(json, "\"mono\"");
    }

    #[test]
    fn weight_from_bold_flag() {
        assert_eq!(FontWeight::from_bold(true), FontWeight::Bold);
        assert_eq!(FontWeight::from_bold(false), FontWeight::Regular);
    }
}
