//! CPU bilinear warp implementation.

use image::{Rgba, RgbaImage};

use super::WarpExecutor;
use crate::mesh::Mesh;

/// Straightforward CPU warper: bilinear position interpolation across each
/// quad, bilinear source sampling at the interpolated position.
///
/// Taps outside the source raster are fully transparent, so content fades
/// cleanly at the source edge instead of smearing the border pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearWarper;

impl BilinearWarper {
    pub fn new() -> Self {
        Self
    }
}

impl WarpExecutor for BilinearWarper {
    fn warp(&self, source: &RgbaImage, mesh: &Mesh, out_size: (u32, u32)) -> RgbaImage {
        let (width, height) = out_size;
        let mut out = RgbaImage::new(width, height);

        for quad in mesh.quads() {
            let b = quad.dst;
            let x_end = b.x2.min(width);
            let y_end = b.y2.min(height);
            if b.x1 >= x_end || b.y1 >= y_end {
                continue;
            }

            // Interpolation parameters run over the full (unclipped) box
            // so clipping never changes the geometry
            let inv_w = 1.0 / b.width() as f64;
            let inv_h = 1.0 / b.height() as f64;
            let [nw, sw, se, ne] = quad.src;

            for y in b.y1..y_end {
                let v = ((y - b.y1) as f64 + 0.5) * inv_h;
                for x in b.x1..x_end {
                    let u = ((x - b.x1) as f64 + 0.5) * inv_w;

                    let top_x = nw.0 + (ne.0 - nw.0) * u;
                    let top_y = nw.1 + (ne.1 - nw.1) * u;
                    let bot_x = sw.0 + (se.0 - sw.0) * u;
                    let bot_y = sw.1 + (se.1 - sw.1) * u;
                    let sx = top_x + (bot_x - top_x) * v;
                    let sy = top_y + (bot_y - top_y) * v;

                    out.put_pixel(x, y, sample_bilinear(source, sx, sy));
                }
            }
        }

        out
    }
}

/// Bilinear tap at a continuous source position, pixel centers at
/// integer + 0.5. Out-of-bounds neighbors contribute transparency.
fn sample_bilinear(source: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let bx = fx.floor();
    let by = fy.floor();
    let tx = fx - bx;
    let ty = fy - by;
    let x0 = bx as i64;
    let y0 = by as i64;

    let mut acc = [0.0f64; 4];
    for (dy, wy) in [(0i64, 1.0 - ty), (1, ty)] {
        if wy == 0.0 {
            continue;
        }
        for (dx, wx) in [(0i64, 1.0 - tx), (1, tx)] {
            let w = wx * wy;
            if w == 0.0 {
                continue;
            }
            if let Some(p) = tap(source, x0 + dx, y0 + dy) {
                for (a, &c) in acc.iter_mut().zip(p.0.iter()) {
                    *a += w * c as f64;
                }
            }
        }
    }

    Rgba([
        acc[0].round().min(255.0) as u8,
        acc[1].round().min(255.0) as u8,
        acc[2].round().min(255.0) as u8,
        acc[3].round().min(255.0) as u8,
    ])
}

fn tap(source: &RgbaImage, x: i64, y: i64) -> Option<&Rgba<u8>> {
    if x < 0 || y < 0 || x >= source.width() as i64 || y >= source.height() as i64 {
        None
    } else {
        Some(source.get_pixel(x as u32, y as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshParams;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([x as u8 * 8, y as u8 * 8, 100, 255])
        })
    }

    fn identity(x: f64, y: f64) -> Option<(f64, f64)> {
        Some((x, y))
    }

    #[test]
    fn test_identity_mesh_copies_source() {
        let src = gradient(16, 16);
        let mesh = Mesh::build(&identity, (16, 16), &MeshParams::new());
        let out = BilinearWarper::new().warp(&src, &mesh, (16, 16));
        assert_eq!(out, src);
    }

    #[test]
    fn test_empty_mesh_is_fully_transparent() {
        let src = gradient(16, 16);
        let nowhere = |_: f64, _: f64| None;
        let mesh = Mesh::build(&nowhere, (16, 16), &MeshParams::new());
        assert!(mesh.is_empty());

        let out = BilinearWarper::new().warp(&src, &mesh, (16, 16));
        assert_eq!(out.dimensions(), (16, 16));
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_shift_mesh_moves_content() {
        let src = gradient(16, 16);
        let shift = |x: f64, y: f64| Some((x + 2.0, y));
        let mesh = Mesh::build(&shift, (16, 16), &MeshParams::new());
        let out = BilinearWarper::new().warp(&src, &mesh, (16, 16));

        for y in 0..16 {
            for x in 0..14 {
                assert_eq!(out.get_pixel(x, y), src.get_pixel(x + 2, y));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_samples_transparent() {
        let src = gradient(8, 8);
        // Everything maps two source-widths to the right
        let outside = |x: f64, y: f64| Some((x + 64.0, y));
        let mesh = Mesh::build(&outside, (8, 8), &MeshParams::new());
        let out = BilinearWarper::new().warp(&src, &mesh, (8, 8));
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_hole_stays_transparent_and_rest_is_painted() {
        let src = RgbaImage::from_pixel(32, 32, Rgba([10, 20, 30, 255]));
        // Undefined on the left half
        let right_half = |x: f64, y: f64| if x >= 16.0 { Some((x, y)) } else { None };
        let mesh = Mesh::build(&right_half, (32, 32), &MeshParams::new());
        let out = BilinearWarper::new().warp(&src, &mesh, (32, 32));

        assert_eq!(out.get_pixel(2, 16).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(24, 16).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_degenerate_quad_paints_one_source_point() {
        let mut src = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        src.put_pixel(3, 4, Rgba([200, 100, 50, 255]));

        let quad = crate::mesh::Quad {
            dst: crate::mesh::QuadBox::new(0, 0, 4, 4),
            src: [(3.5, 4.5); 4],
        };
        let mesh = Mesh::from_parts(vec![quad], 4, 4);
        let out = BilinearWarper::new().warp(&src, &mesh, (4, 4));
        assert!(out.pixels().all(|p| p.0 == [200, 100, 50, 255]));
    }

    #[test]
    fn test_quads_clip_to_out_size() {
        let src = gradient(16, 16);
        let mesh = Mesh::build(&identity, (16, 16), &MeshParams::new());

        // Smaller canvas than the mesh was built for
        let out = BilinearWarper::new().warp(&src, &mesh, (10, 12));
        assert_eq!(out.dimensions(), (10, 12));
        for y in 0..12 {
            for x in 0..10 {
                assert_eq!(out.get_pixel(x, y), src.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_interpolated_positions_blend_neighbors() {
        // Two-pixel source, black then white; sampling halfway between
        // their centers must land in the middle
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let p = sample_bilinear(&src, 1.0, 0.5);
        assert_eq!(p.0, [128, 128, 128, 255]);
    }
}
