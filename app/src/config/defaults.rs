//! Default paths and the environment overrides understood by the loader.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Directory searched for `bluray_*.png` logo files.
pub const DEFAULT_LOGO_DIR: &str = "assets/logos";

/// Width of the optional PNG preview, in pixels.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 1200;

type DefTuple = (&'static str, &'static str);

const ENV_DEFS: &[DefTuple] = &[
    ("COVER_SWAP", "Swap front and back images (true/false)"),
    ("COVER_SPINE_TEXT", "Spine title"),
    ("COVER_SPINE_COLOR", "Spine fill color (#rrggbb)"),
    ("COVER_BACK_TEXT", "Back panel text, '\\n' breaks lines"),
    ("COVER_BACK_COLOR", "Back panel color (#rrggbb)"),
    ("COVER_LOGO_VARIANT", "Logo variant: white, black or blue"),
    ("COVER_DPI", "Render resolution in dots per inch"),
    ("COVER_JPEG_QUALITY", "JPEG quality (1-100)"),
    ("COVER_LOGO_DIR", "Directory containing the logo files"),
    ("COVER_FONT_DIR", "Directory with the DejaVu font files"),
];

/// A single environment override definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub description: &'static str,
}

/// Environment override definitions indexed by key.
pub static ENV_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    ENV_DEFS
        .iter()
        .map(|&(key, description)| (key, SettingDef { key, description }))
        .collect()
});

/// Override keys in a stable order.
pub fn env_keys() -> impl Iterator<Item = &'static str> {
    ENV_DEFS.iter().map(|&(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_indexed() {
        assert_eq!(ENV_SETTINGS.len(), ENV_DEFS.len());
        for key in env_keys() {
            assert!(key.starts_with("COVER_"));
            assert!(!ENV_SETTINGS[key].description.is_empty());
        }
    }
}
