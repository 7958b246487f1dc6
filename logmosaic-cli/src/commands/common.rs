//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use image::RgbaImage;
use logmosaic::mesh::{Mesh, MeshParams};
use logmosaic::transform::CoordinateTransform;
use logmosaic::warp::{BilinearWarper, WarpExecutor};
use logmosaic::{MapScale, MapStyle, ProjectionMode, ZoomRange};

use crate::error::CliError;

/// Map style selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum StyleArg {
    /// Satellite imagery
    Satellite,
    /// Plain road map
    Roadmap,
    /// Satellite imagery with road overlay
    Hybrid,
    /// Shaded terrain
    Terrain,
}

impl From<StyleArg> for MapStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Satellite => MapStyle::Satellite,
            StyleArg::Roadmap => MapStyle::Roadmap,
            StyleArg::Hybrid => MapStyle::Hybrid,
            StyleArg::Terrain => MapStyle::Terrain,
        }
    }
}

/// Band alignment selection for the render command.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum ProjectionArg {
    /// Globe-like view, bands aligned by apparent ground scale
    Orthographic,
    /// Flat stacking straight off the Mercator fragments
    Mercator,
}

impl From<ProjectionArg> for ProjectionMode {
    fn from(projection: ProjectionArg) -> Self {
        match projection {
            ProjectionArg::Orthographic => ProjectionMode::Orthographic,
            ProjectionArg::Mercator => ProjectionMode::Mercator,
        }
    }
}

/// Fragment resolution multiplier selection.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum ScaleArg {
    /// Native resolution
    #[value(name = "1")]
    One,
    /// Double-resolution fragments
    #[value(name = "2")]
    Two,
}

impl From<ScaleArg> for MapScale {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::One => MapScale::One,
            ScaleArg::Two => MapScale::Two,
        }
    }
}

/// Parse a `W:H` pixel pair, as in `--fragment-size 512:512`.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(':')
        .ok_or_else(|| format!("expected W:H, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h = h
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", h))?;
    Ok((w, h))
}

/// Parse a `Z0:Z1` zoom range, as in `--zoom-levels 0:19`.
pub fn parse_zoom_range(s: &str) -> Result<ZoomRange, String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected Z0:Z1, got '{}'", s))?;
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid zoom '{}'", start))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid zoom '{}'", end))?;
    ZoomRange::new(start, end).map_err(|e| e.to_string())
}

/// Parse an `X:Y` point in pixels, as in `--center 256:256`.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(':')
        .ok_or_else(|| format!("expected X:Y, got '{}'", s))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate '{}'", x))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate '{}'", y))?;
    Ok((x, y))
}

/// Output path next to the input: `{stem}_{suffix}.png`.
pub fn derived_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "out".to_string());
    input.with_file_name(format!("{}_{}.png", stem, suffix))
}

/// Load a local image as RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, CliError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|error| CliError::ImageRead {
            path: path.display().to_string(),
            error,
        })
}

/// Save a raster to disk, format chosen from the extension.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), CliError> {
    image.save(path).map_err(|error| CliError::ImageWrite {
        path: path.display().to_string(),
        error,
    })
}

/// Run a transform over a source image through the mesh/warp pipeline.
pub fn reproject(
    source: &RgbaImage,
    transform: &dyn CoordinateTransform,
    out_size: (u32, u32),
    mesh_step: u32,
) -> RgbaImage {
    let params = MeshParams::new().with_step(mesh_step);
    let mesh = Mesh::build(transform, out_size, &params);
    BilinearWarper::new().warp(source, &mesh, out_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_valid() {
        assert_eq!(parse_size("512:512"), Ok((512, 512)));
        assert_eq!(parse_size("640:480"), Ok((640, 480)));
        assert_eq!(parse_size(" 100 : 200 "), Ok((100, 200)));
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("512").is_err());
        assert!(parse_size("512x512").is_err());
        assert!(parse_size("a:b").is_err());
        assert!(parse_size("-1:512").is_err());
    }

    #[test]
    fn test_parse_zoom_range_valid() {
        let range = parse_zoom_range("0:19").unwrap();
        assert_eq!(range.start(), 0);
        assert_eq!(range.end(), 19);
    }

    #[test]
    fn test_parse_zoom_range_rejects_inverted() {
        assert!(parse_zoom_range("5:2").is_err());
        assert!(parse_zoom_range("0:22").is_err());
        assert!(parse_zoom_range("0-19").is_err());
    }

    #[test]
    fn test_parse_point_valid() {
        assert_eq!(parse_point("256:128.5"), Ok((256.0, 128.5)));
        assert!(parse_point("x:y").is_err());
    }

    #[test]
    fn test_derived_output_keeps_directory() {
        let out = derived_output(Path::new("shots/city.jpeg"), "logpolar");
        assert_eq!(out, PathBuf::from("shots/city_logpolar.png"));
    }
}
