//! Pixel compositing helpers.

use image::{Rgba, RgbaImage};

use crate::geometry::Region;

/// Alpha-composite `top` onto `base` with its top-left corner at (`x`, `y`).
///
/// Parts of `top` falling outside `base` are clipped. Offsets may be negative.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    let (base_w, base_h) = (i64::from(base.width()), i64::from(base.height()));

    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + i64::from(dx);
        let target_y = y + i64::from(dy);
        if target_x < 0 || target_y < 0 || target_x >= base_w || target_y >= base_h {
            continue;
        }
        let (tx, ty) = (target_x as u32, target_y as u32);

        match pixel[3] {
            0 => {}
            255 => base.put_pixel(tx, ty, *pixel),
            _ => {
                let bg = base.get_pixel(tx, ty);
                let blended = blend_pixel(bg, pixel);
                base.put_pixel(tx, ty, blended);
            }
        }
    }
}

/// Fill a rectangle with a solid color, clipped to the image.
pub fn fill_region(img: &mut RgbaImage, region: Region, color: Rgba<u8>) {
    let right = region.right().min(img.width());
    let bottom = region.bottom().min(img.height());
    for y in region.y..bottom {
        for x in region.x..right {
            img.put_pixel(x, y, color);
        }
    }
}

/// Composite the image over an opaque background, leaving every pixel opaque.
pub fn flatten_onto(img: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(
        img.width(),
        img.height(),
        Rgba([background[0], background[1], background[2], 255]),
    );
    overlay(&mut out, img, 0, 0);
    out
}

/// Source-over blend of straight-alpha pixels.
fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>) -> Rgba<u8> {
    let fa = f32::from(fg[3]) / 255.0;
    let ba = f32::from(bg[3]) / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (f32::from(fg[i]) * fa + f32::from(bg[i]) * ba * (1.0 - fa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255]));
        overlay(&mut base, &top, 80, 80); // partially out of bounds
        overlay(&mut base, &top, -30, -30);
        overlay(&mut base, &top, 500, -500);
        assert_eq!(base.get_pixel(99, 99), &Rgba([255, 0, 0, 255]));
        assert_eq!(base.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(base.get_pixel(50, 50), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn overlay_respects_transparency() {
        let mut base = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 255, 255]));
        let mut top = RgbaImage::new(2, 1);
        top.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        top.put_pixel(1, 0, Rgba([255, 0, 0, 128]));
        overlay(&mut base, &top, 0, 0);

        assert_eq!(base.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        let half = base.get_pixel(1, 0);
        assert_eq!(half[3], 255);
        assert!((126..=130).contains(&half[0]), "got {half:?}");
        assert!((125..=129).contains(&half[2]), "got {half:?}");
    }

    #[test]
    fn fill_region_is_clipped() {
        let mut img = RgbaImage::new(10, 10);
        fill_region(&mut img, Region::new(8, 8, 5, 5), Rgba([1, 2, 3, 255]));
        assert_eq!(img.get_pixel(9, 9), &Rgba([1, 2, 3, 255]));
        assert_eq!(img.get_pixel(7, 7), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn flatten_makes_everything_opaque() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let flat = flatten_onto(&img, Rgba([255, 255, 255, 255]));
        assert!(flat.pixels().all(|p| p[3] == 255));
        assert_eq!(flat.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
    }
}
