//! Canvas compositor: assembles back panel, spine and front panel.
//!
//! Layout, back to front:
//!
//! ```text
//! +-------------+---+-------------+
//! |             | S |             |
//! |    back     | P |    front    |
//! |   (logo)    | I |   (logo)    |
//! |             | N |             |
//! |             | E |             |
//! +-------------+---+-------------+
//! ```
//!
//! 1. white canvas
//! 2. back panel (cropped + stretched) at x = 0
//! 3. spine color over the spine strip
//! 4. front panel (cropped + stretched) after the spine
//! 5. rotated spine title
//! 6. logos on the enabled panels

use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::compose;
use crate::config::{BackMode, CoverConfig};
use crate::crop::crop_by_percent;
use crate::error::CoverError;
use crate::fonts::{FontRegistry, FontWeight};
use crate::logo::{self, LogoPlacement, LogoRegistry};
use crate::resize;
use crate::spine;
use crate::text::{self, TextLayout};

const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Decoded source images for one render.
#[derive(Debug, Clone)]
pub struct RenderInput {
    pub front: RgbaImage,
    /// Used when the back panel is in image mode.
    pub back: Option<RgbaImage>,
}

impl RenderInput {
    pub fn new(front: RgbaImage) -> Self {
        Self { front, back: None }
    }

    pub fn with_back(mut self, back: RgbaImage) -> Self {
        self.back = Some(back);
        self
    }
}

/// Non-fatal problems hit while rendering. The cover is still complete
/// apart from the affected feature.
#[derive(Debug, thiserror::Error)]
pub enum CoverWarning {
    #[error("Logo skipped: {0}")]
    LogoUnavailable(#[source] CoverError),

    #[error("Back panel is in image mode but no back image was supplied; using solid color")]
    MissingBackImage,
}

/// A finished cover and what happened while building it.
#[derive(Debug)]
pub struct RenderOutput {
    pub canvas: RgbaImage,
    pub warnings: Vec<CoverWarning>,
    /// Font size the spine title was drawn at.
    pub spine_font_size: Option<u32>,
    /// Layout of the back panel text, when drawn.
    pub back_text: Option<TextLayout>,
}

/// Render a complete cover.
///
/// Each call builds its own canvas; registries are only read, so renders
/// may run on several threads at once.
pub fn render_cover(
    input: RenderInput,
    config: &CoverConfig,
    fonts: &FontRegistry,
    logos: &LogoRegistry,
) -> RenderOutput {
    let dims = &config.dimensions;
    let (panel_w, height) = (dims.panel_width_px(), dims.height_px());
    let (canvas_w, canvas_h) = dims.canvas_size();
    let mut warnings = Vec::new();
    let mut back_text = None;

    info!(
        canvas_w,
        canvas_h,
        dpi = dims.dpi,
        swap = config.swap,
        "Rendering cover"
    );

    let RenderInput { front, back } = input;

    let mode = match (config.back.mode, &back) {
        (BackMode::Image, None) => {
            warn!("Back image mode requested without a back image");
            warnings.push(CoverWarning::MissingBackImage);
            BackMode::Solid
        }
        (mode, _) => mode,
    };

    let back = match (mode, back) {
        (BackMode::Image, Some(img)) => img,
        _ => {
            let color = config.back.color.to_rgba();
            let mut panel = RgbaImage::from_pixel(panel_w, height, color);
            let block = config.back.text_block(panel_w);
            back_text = text::draw_text_block(&mut panel, fonts, &block);
            panel
        }
    };

    // Swap happens before cropping: crops belong to the logical roles.
    let (front, back) = if config.swap { (back, front) } else { (front, back) };

    let front = crop_by_percent(&front, &config.front_crop);
    let front = resize::fit_exact(&front, panel_w, height);
    let back = crop_by_percent(&back, &config.back_crop);
    let back = resize::fit_exact(&back, panel_w, height);

    let back_region = dims.back_region();
    let spine_region = dims.spine_region();
    let front_region = dims.front_region();

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, CANVAS_BACKGROUND);
    let (back_x, back_y) = (i64::from(back_region.x), i64::from(back_region.y));
    compose::overlay(&mut canvas, &back, back_x, back_y);
    compose::fill_region(&mut canvas, spine_region, config.spine.color.to_rgba());
    let (front_x, front_y) = (i64::from(front_region.x), i64::from(front_region.y));
    compose::overlay(&mut canvas, &front, front_x, front_y);

    let spine_font = fonts.font(config.spine.font, FontWeight::from_bold(config.spine.bold));
    let spine_font_size = spine::draw_spine_text(
        &mut canvas,
        spine_region,
        &config.spine.text,
        config.spine.text_color,
        &spine_font,
        config.spine.font_size_px,
        config.spine.rotation,
    );

    let logo_cfg = &config.logo;
    if logo_cfg.on_front || logo_cfg.on_back {
        match logos.get(logo_cfg.variant) {
            Ok(logo_img) => {
                let max_width = dims.px(logo_cfg.max_width_mm);
                let margin = dims.px(logo_cfg.margin_mm);
                let sides = [
                    (logo_cfg.on_front, front_region, logo_cfg.front_corner),
                    (logo_cfg.on_back, back_region, logo_cfg.back_corner),
                ];
                for (enabled, region, corner) in sides {
                    if enabled {
                        let placement = LogoPlacement {
                            max_width,
                            margin,
                            region,
                            corner,
                        };
                        logo::place_logo(&mut canvas, logo_img, &placement);
                    }
                }
            }
            Err(e) => {
                warn!("{e}");
                warnings.push(CoverWarning::LogoUnavailable(e));
            }
        }
    }

    debug!(warnings = warnings.len(), ?spine_font_size, "Cover rendered");

    RenderOutput {
        canvas,
        warnings,
        spine_font_size,
        back_text,
    }
}
