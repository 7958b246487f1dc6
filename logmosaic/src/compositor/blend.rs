//! Mask-weighted band compositing.

use image::RgbaImage;

/// Blends `band` onto `canvas` at `offset`, using the band's alpha
/// channel as the blend mask.
///
/// Color channels move toward the band value in proportion to the mask,
/// in the stored color space; the canvas alpha accumulates saturating
/// toward opaque, so overlapping feather ramps close up instead of
/// leaving a translucent seam. Band pixels falling outside the canvas
/// are clipped.
pub fn paste_masked(canvas: &mut RgbaImage, band: &RgbaImage, offset: (i64, i64)) {
    let (ox, oy) = offset;
    let (cw, ch) = canvas.dimensions();

    for (x, y, p) in band.enumerate_pixels() {
        let cx = ox + x as i64;
        let cy = oy + y as i64;
        if cx < 0 || cy < 0 || cx >= cw as i64 || cy >= ch as i64 {
            continue;
        }

        let m = p.0[3];
        if m == 0 {
            continue;
        }

        let bg = canvas.get_pixel_mut(cx as u32, cy as u32);
        for i in 0..3 {
            bg.0[i] = lerp_u8(bg.0[i], p.0[i], m);
        }
        bg.0[3] = bg.0[3].saturating_add(m);
    }
}

/// `bg + (src - bg) * m / 255` with a single rounding step.
fn lerp_u8(bg: u8, src: u8, m: u8) -> u8 {
    let m = u32::from(m);
    ((u32::from(bg) * (255 - m) + u32::from(src) * m + 127) / 255) as u8
}
