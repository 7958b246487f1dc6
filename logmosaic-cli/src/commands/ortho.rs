//! Ortho command - mercator to orthographic re-projection of a local image.

use std::path::PathBuf;

use clap::Args;
use logmosaic::projection::MercatorOrtho;

use super::common;
use crate::error::CliError;

/// Arguments for the ortho command.
#[derive(Debug, Args)]
pub struct OrthoArgs {
    /// Latitude of the image center in decimal degrees
    pub lat: f64,

    /// Input Mercator image path
    pub input: PathBuf,

    /// Longitude span of the input image in degrees
    pub lon_width_deg: f64,

    /// Output image path [default: {INPUT}_ortho.png]
    pub output: Option<PathBuf>,

    /// Output image width in pixels [default: the input width]
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Mesh grid step in output pixels
    #[arg(long, default_value_t = 8)]
    pub mesh_step: u32,
}

/// Run the ortho command.
pub fn run(args: OrthoArgs) -> Result<(), CliError> {
    let source = common::load_image(&args.input)?;

    let out_width = args.width.unwrap_or(source.width());
    let projection = MercatorOrtho::new(
        source.dimensions(),
        args.lat.to_radians(),
        args.lon_width_deg.to_radians(),
        out_width,
    );
    let out_size = projection.output_size();
    let globe = common::reproject(&source, &projection, out_size, args.mesh_step);

    let output = args
        .output
        .unwrap_or_else(|| common::derived_output(&args.input, "ortho"));
    common::save_image(&globe, &output)?;

    println!(
        "Saved {} ({}x{} px)",
        output.display(),
        globe.width(),
        globe.height()
    );
    Ok(())
}
