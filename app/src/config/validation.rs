//! Setting value validation.

use cover_engine::{Color, CoverConfig};

/// Validate a single environment override. Returns `Ok(())` if valid, or an
/// error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "COVER_SWAP" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        "COVER_SPINE_COLOR" | "COVER_BACK_COLOR" => {
            value.parse::<Color>().map_err(|e| e.to_string())?;
        }
        "COVER_LOGO_VARIANT" => {
            if !["white", "black", "blue"].contains(&value) {
                return Err("must be white, black, or blue".into());
            }
        }
        "COVER_DPI" => validate_int_range(value, 1, 1200)?,
        "COVER_JPEG_QUALITY" => validate_int_range(value, 1, 100)?,
        "COVER_LOGO_DIR" | "COVER_FONT_DIR" => {
            if value.trim().is_empty() {
                return Err("path must not be empty".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

/// Validate a merged cover configuration against the editor's limits.
pub fn validate_cover(cfg: &CoverConfig) -> Result<(), String> {
    let mut errors = Vec::new();

    let spine_size = f64::from(cfg.spine.font_size_px);
    let back_size = f64::from(cfg.back.font_size_px);
    let ranges = [
        ("spine.font_size_px", spine_size, 10.0, 220.0),
        ("back.font_size_px", back_size, 10.0, 140.0),
        ("logo.max_width_mm", cfg.logo.max_width_mm, 10.0, 60.0),
        ("logo.margin_mm", cfg.logo.margin_mm, 2.0, 20.0),
    ];
    for (name, v, min, max) in ranges {
        if !(min..=max).contains(&v) {
            errors.push(format!("{name} must be between {min} and {max}, got {v}"));
        }
    }

    let crops = [
        ("front_crop", &cfg.front_crop),
        ("back_crop", &cfg.back_crop),
    ];
    for (side, crop) in crops {
        for (edge, v) in [
            ("left", crop.left),
            ("right", crop.right),
            ("top", crop.top),
            ("bottom", crop.bottom),
        ] {
            if !(0.0..100.0).contains(&v) {
                errors.push(format!("{side}.{edge} must be in [0, 100), got {v}"));
            }
        }
    }

    let dims = &cfg.dimensions;
    let dpi = dims.dpi;
    if !(1..=1200).contains(&dpi) {
        errors.push(format!("dimensions.dpi must be in 1..=1200, got {dpi}"));
    }
    for (name, v) in [
        ("dimensions.panel_width_mm", dims.panel_width_mm),
        ("dimensions.spine_width_mm", dims.spine_width_mm),
        ("dimensions.height_mm", dims.height_mm),
    ] {
        if !(v > 0.0) {
            errors.push(format!("{name} must be positive, got {v}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
