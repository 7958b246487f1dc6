//! Alpha feather masks for fragment edges.
//!
//! A feather mask fades a fragment's opacity to zero near its borders so
//! that overlapping warped bands blend into each other instead of meeting
//! at a hard seam. Individual edges can instead be pinned fully
//! transparent via [`Margins`], which crops content (such as a service
//! watermark strip) out of the blend entirely.

use image::{GrayImage, Luma, RgbaImage};

/// Per-edge hard-transparent margins, in pixels.
///
/// A nonzero margin removes that edge's feather ramp and zeroes the strip
/// outright; the remaining interior feathers as usual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Margins {
    pub const NONE: Margins = Margins {
        top: 0,
        bottom: 0,
        left: 0,
        right: 0,
    };

    /// Margin on the bottom edge only.
    pub fn bottom(px: u32) -> Self {
        Margins {
            bottom: px,
            ..Self::NONE
        }
    }
}

/// Builds an opacity mask for a fragment of the given size.
///
/// Interior pixels are opaque (255); opacity ramps linearly to zero over
/// `gradient` pixels toward each unmargined edge, using the pixel's
/// distance to the nearest edge so corners fade diagonally. A `gradient`
/// of zero disables the ramp. Margined strips are zero with no ramp; if
/// the margins consume the whole fragment the mask is fully transparent.
pub fn feather_mask(size: (u32, u32), gradient: u32, margins: Margins) -> GrayImage {
    let (width, height) = size;
    let mut mask = GrayImage::new(width, height);

    let inner_w = width.saturating_sub(margins.left.saturating_add(margins.right));
    let inner_h = height.saturating_sub(margins.top.saturating_add(margins.bottom));
    if inner_w == 0 || inner_h == 0 {
        return mask;
    }

    let inner = feathered_interior((inner_w, inner_h), gradient);
    for (x, y, p) in inner.enumerate_pixels() {
        mask.put_pixel(margins.left + x, margins.top + y, *p);
    }

    mask
}

fn feathered_interior(size: (u32, u32), gradient: u32) -> GrayImage {
    let (width, height) = size;
    if gradient == 0 {
        return GrayImage::from_pixel(width, height, Luma([255]));
    }

    let g = gradient as f64;
    GrayImage::from_fn(width, height, |x, y| {
        let d = x.min(width - 1 - x).min(y).min(height - 1 - y);
        let k = (255.0 * d as f64 / g).round().min(255.0) as u8;
        Luma([k])
    })
}

/// Replaces the raster's alpha channel with the mask.
///
/// Dimensions must match.
pub fn apply_alpha(image: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());
    for (pixel, m) in image.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = m.0[0];
    }
}
