//! Unlog command - inverse log-polar transform of a local strip.

use std::path::PathBuf;

use clap::Args;
use logmosaic::projection::InverseLogPolar;

use super::common;
use crate::error::CliError;

/// Arguments for the unlog command.
#[derive(Debug, Args)]
pub struct UnlogArgs {
    /// Input strip path
    pub input: PathBuf,

    /// Output image path [default: {INPUT}_unlog.png]
    pub output: Option<PathBuf>,

    /// Strip row holding the outermost radius
    #[arg(short = 't', long, value_name = "Y", default_value_t = 0.0)]
    pub top: f64,

    /// Output image width in pixels
    #[arg(short = 'w', long, default_value_t = 1024)]
    pub width: u32,

    /// Output image height in pixels
    #[arg(short = 'H', long, default_value_t = 1024)]
    pub height: u32,

    /// Mesh grid step in output pixels
    #[arg(long, default_value_t = 8)]
    pub mesh_step: u32,
}

/// Run the unlog command.
pub fn run(args: UnlogArgs) -> Result<(), CliError> {
    let strip = common::load_image(&args.input)?;

    let out_size = (args.width, args.height);
    let projection = InverseLogPolar::new(strip.dimensions(), out_size, args.top);
    let disc = common::reproject(&strip, &projection, out_size, args.mesh_step);

    let output = args
        .output
        .unwrap_or_else(|| common::derived_output(&args.input, "unlog"));
    common::save_image(&disc, &output)?;

    println!(
        "Saved {} ({}x{} px)",
        output.display(),
        disc.width(),
        disc.height()
    );
    Ok(())
}
