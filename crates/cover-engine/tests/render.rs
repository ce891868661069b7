//! End-to-end cover rendering.

use cover_engine::config::BackMode;
use cover_engine::{
    Color, CoverConfig, CoverDimensions, CoverWarning, CropSpec, FontRegistry, LogoRegistry,
    LogoVariant, RenderInput, encode_jpeg, mm_to_px, render_cover,
};
use image::{Rgba, RgbaImage};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

fn solid(w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(w, h, color)
}

/// Left half red, right half green.
fn split_red_green(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, _| if x < w / 2 { RED } else { GREEN })
}

fn close_to(px: &Rgba<u8>, expected: Rgba<u8>) -> bool {
    px.0.iter()
        .zip(expected.0.iter())
        .all(|(a, b)| (i16::from(*a) - i16::from(*b)).abs() <= 8)
}

/// Low resolution layout for fast tests.
fn small_config() -> CoverConfig {
    let mut cfg = CoverConfig::default();
    cfg.dimensions = CoverDimensions {
        dpi: 60,
        ..CoverDimensions::default()
    };
    cfg.logo.on_front = false;
    cfg.logo.on_back = false;
    cfg
}

fn no_logos() -> LogoRegistry {
    LogoRegistry::default()
}

#[test]
fn full_resolution_cover_layout() {
    let mut cfg = CoverConfig::default();
    cfg.back.mode = BackMode::Image;
    cfg.spine.text = "TITLE".into();
    cfg.spine.color = Color::rgb(20, 20, 20);
    cfg.spine.text_color = Color::WHITE;

    let input = RenderInput::new(solid(200, 300, RED))
        .with_back(solid(200, 300, BLUE));
    let out = render_cover(input, &cfg, &FontRegistry::fallback_only(), &no_logos());
    let canvas = &out.canvas;

    let panel_w = mm_to_px(130.0, 300);
    let spine_w = mm_to_px(10.0, 300);
    let height = mm_to_px(150.0, 300);
    assert_eq!(canvas.dimensions(), (panel_w * 2 + spine_w, height));

    // Logos enabled by default but none available
    assert_eq!(out.warnings.len(), 1);
    assert!(matches!(out.warnings[0], CoverWarning::LogoUnavailable(_)));

    assert!(close_to(canvas.get_pixel(panel_w / 2, height / 2), BLUE));
    let front_mid = panel_w + spine_w + panel_w / 2;
    assert!(close_to(canvas.get_pixel(front_mid, height / 2), RED));

    // Spine: background color at the ends, white title pixels in the middle
    let spine_bg = Rgba([20, 20, 20, 255]);
    let spine_mid = panel_w + spine_w / 2;
    assert_eq!(canvas.get_pixel(spine_mid, 2), &spine_bg);
    assert_eq!(canvas.get_pixel(spine_mid, height - 3), &spine_bg);
    let bright = (panel_w..panel_w + spine_w)
        .flat_map(|x| (height / 3..2 * height / 3).map(move |y| (x, y)))
        .filter(|&(x, y)| canvas.get_pixel(x, y)[0] > 200)
        .count();
    assert!(bright > 100, "spine title missing ({bright} bright px)");
    assert_eq!(out.spine_font_size, Some(90));
}

#[test]
fn swap_moves_images_and_keeps_crop_roles() {
    let mut cfg = small_config();
    cfg.back.mode = BackMode::Image;
    cfg.spine.text.clear();
    // Crop away the red half of whatever is logically front
    cfg.front_crop = CropSpec::new(50.0, 0.0, 0.0, 0.0);

    let render = |swap: bool| {
        let mut cfg = cfg.clone();
        cfg.swap = swap;
        let input = RenderInput::new(split_red_green(200, 300))
            .with_back(solid(200, 300, BLUE));
        render_cover(input, &cfg, &FontRegistry::fallback_only(), &no_logos()).canvas
    };

    let dims = cfg.dimensions;
    let back = dims.back_region();
    let front = dims.front_region();
    let mid_y = dims.height_px() / 2;

    // No swap: front image (red|green) cropped to green, back stays blue
    let canvas = render(false);
    assert!(close_to(canvas.get_pixel(front.x + 2, mid_y), GREEN));
    let back_mid = back.x + back.width / 2;
    assert!(close_to(canvas.get_pixel(back_mid, mid_y), BLUE));

    // Swap: the blue image becomes the front and takes the front crop; the
    // red|green image lands on the back uncropped.
    let canvas = render(true);
    let front_mid = front.x + front.width / 2;
    assert!(close_to(canvas.get_pixel(front_mid, mid_y), BLUE));
    assert!(close_to(canvas.get_pixel(back.x + 2, mid_y), RED));
    assert!(close_to(canvas.get_pixel(back.right() - 3, mid_y), GREEN));
}

#[test]
fn solid_back_without_text_is_plain() {
    let mut cfg = small_config();
    cfg.back.mode = BackMode::Solid;
    cfg.back.color = Color::rgb(10, 120, 30);
    cfg.back.text = String::new();

    let out = render_cover(
        RenderInput::new(solid(50, 50, RED)),
        &cfg,
        &FontRegistry::fallback_only(),
        &no_logos(),
    );
    assert!(out.back_text.is_none());
    assert!(out.warnings.is_empty());

    let back = cfg.dimensions.back_region();
    let expected = Rgba([10, 120, 30, 255]);
    for y in back.y..back.bottom() {
        for x in back.x..back.right() {
            assert_eq!(out.canvas.get_pixel(x, y), &expected, "at ({x}, {y})");
        }
    }
}

#[test]
fn solid_back_text_is_drawn_inside_back_panel() {
    let mut cfg = small_config();
    cfg.back.text = "Director's cut\n\nRegion B".into();
    cfg.back.text_color = Color::WHITE;
    cfg.back.color = Color::BLACK;

    let out = render_cover(
        RenderInput::new(solid(50, 50, RED)),
        &cfg,
        &FontRegistry::fallback_only(),
        &no_logos(),
    );
    let layout = out.back_text.expect("back text drawn");
    assert!(layout.lines.len() >= 3);
    let has_blank = layout.lines.iter().any(|l| l.text.is_empty());
    assert!(has_blank, "blank line kept");
    assert!(layout.fits);

    let back = cfg.dimensions.back_region();
    let lit = (back.x..back.right())
        .flat_map(|x| (back.y..back.bottom()).map(move |y| (x, y)))
        .filter(|&(x, y)| out.canvas.get_pixel(x, y)[0] > 128)
        .count();
    assert!(lit > 0);
}

#[test]
fn image_mode_without_back_falls_back_to_solid() {
    let mut cfg = small_config();
    cfg.back.mode = BackMode::Image;
    cfg.back.color = Color::rgb(1, 2, 3);

    let out = render_cover(
        RenderInput::new(solid(50, 50, RED)),
        &cfg,
        &FontRegistry::fallback_only(),
        &no_logos(),
    );
    let warnings = out.warnings.as_slice();
    assert!(matches!(warnings, [CoverWarning::MissingBackImage]));
    let back = cfg.dimensions.back_region();
    let px = out.canvas.get_pixel(back.width / 2, back.height / 2);
    assert_eq!(px, &Rgba([1, 2, 3, 255]));
}

#[test]
fn logos_are_placed_in_configured_corners() {
    let mut cfg = small_config();
    cfg.spine.text.clear();
    cfg.logo.on_front = true;
    cfg.logo.on_back = true;
    cfg.logo.variant = LogoVariant::Blue;
    cfg.logo.max_width_mm = 20.0;
    cfg.logo.margin_mm = 5.0;
    cfg.back.mode = BackMode::Image;

    // Far wider than 20 mm at 60 dpi (47 px): gets downscaled
    let logos = LogoRegistry::from_images([(LogoVariant::Blue, solid(400, 100, GREEN))]);
    let input = RenderInput::new(solid(50, 50, RED))
        .with_back(solid(50, 50, BLUE));
    let out = render_cover(input, &cfg, &FontRegistry::fallback_only(), &logos);
    assert!(out.warnings.is_empty());

    let dims = cfg.dimensions;
    let margin = dims.px(5.0);
    let logo_w = dims.px(20.0);
    let logo_h = 100 * logo_w / 400;
    let front = dims.front_region();
    let back = dims.back_region();

    // Front: bottom-right
    let fx = front.right() - margin - logo_w / 2;
    let fy = front.bottom() - margin - logo_h / 2;
    assert!(close_to(out.canvas.get_pixel(fx, fy), GREEN));
    let outside = front.right() - margin / 2;
    assert!(close_to(out.canvas.get_pixel(outside, fy), RED));

    // Back: bottom-left
    let bx = back.x + margin + logo_w / 2;
    let by = back.bottom() - margin - logo_h / 2;
    assert!(close_to(out.canvas.get_pixel(bx, by), GREEN));
    assert!(close_to(out.canvas.get_pixel(bx, back.y + margin), BLUE));
}

#[test]
fn missing_logo_is_a_warning_not_a_failure() {
    let mut cfg = small_config();
    cfg.logo.on_front = true;

    let out = render_cover(
        RenderInput::new(solid(50, 50, RED)),
        &cfg,
        &FontRegistry::fallback_only(),
        &LogoRegistry::load("/nonexistent/logo/dir"),
    );
    assert_eq!(out.warnings.len(), 1);
    let msg = out.warnings[0].to_string();
    assert!(msg.contains("bluray_white.png"), "{msg}");
    assert_eq!(out.canvas.dimensions(), cfg.dimensions.canvas_size());
}

#[test]
fn concurrent_renders_are_independent() {
    let fonts = FontRegistry::fallback_only();
    let logos = no_logos();
    let cfg = small_config();

    std::thread::scope(|s| {
        let handles: Vec<_> = [RED, GREEN, BLUE]
            .into_iter()
            .map(|color| {
                let (fonts, logos, cfg) = (&fonts, &logos, &cfg);
                s.spawn(move || {
                    let input = RenderInput::new(solid(40, 40, color));
                    let out = render_cover(input, cfg, fonts, logos);
                    (color, out.canvas)
                })
            })
            .collect();

        for handle in handles {
            let (color, canvas) = handle.join().unwrap();
            let front = cfg.dimensions.front_region();
            let front_mid = front.x + front.width / 2;
            assert!(close_to(canvas.get_pixel(front_mid, 10), color));
        }
    });
}

#[test]
fn exported_cover_is_rgb_jpeg() {
    let cfg = small_config();
    let out = render_cover(
        RenderInput::new(solid(50, 50, RED)),
        &cfg,
        &FontRegistry::fallback_only(),
        &no_logos(),
    );
    let bytes = encode_jpeg(&out.canvas, cfg.dimensions.dpi, 95).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
    let expected = cfg.dimensions.canvas_size();
    assert_eq!((decoded.width(), decoded.height()), expected);
}
