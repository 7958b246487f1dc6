//! Logpolar command - log-polar transform of a local image.

use std::path::PathBuf;

use clap::Args;
use logmosaic::projection::{LogPolar, LogPolarConfig};

use super::common;
use crate::error::CliError;

/// Arguments for the logpolar command.
#[derive(Debug, Args)]
pub struct LogpolarArgs {
    /// Input image path
    pub input: PathBuf,

    /// Output image path [default: {INPUT}_logpolar.png]
    pub output: Option<PathBuf>,

    /// Projection center in source pixels [default: the image midpoint]
    #[arg(short = 'c', long, value_name = "X:Y", value_parser = common::parse_point)]
    pub center: Option<(f64, f64)>,

    /// Angle mapped to the strip's left edge, in degrees
    #[arg(short = 'A', long, value_name = "DEG", default_value_t = 0.0)]
    pub angle: f64,

    /// Output strip width [default: (source width + height) * 2]
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Output strip height [default: derived so the whole source fits]
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Mesh grid step in output pixels
    #[arg(long, default_value_t = 8)]
    pub mesh_step: u32,
}

/// Run the logpolar command.
pub fn run(args: LogpolarArgs) -> Result<(), CliError> {
    let source = common::load_image(&args.input)?;

    let mut config =
        LogPolarConfig::new(source.dimensions()).with_start_angle(args.angle.to_radians());
    if let Some((x, y)) = args.center {
        config = config.with_center(x, y);
    }
    if let Some(width) = args.width {
        config = config.with_out_width(width);
    }
    if let Some(height) = args.height {
        config = config.with_out_height(height);
    }

    let projection = LogPolar::new(config);
    let out_size = projection.output_size();
    let strip = common::reproject(&source, &projection, out_size, args.mesh_step);

    let output = args
        .output
        .unwrap_or_else(|| common::derived_output(&args.input, "logpolar"));
    common::save_image(&strip, &output)?;

    println!(
        "Saved {} ({}x{} px)",
        output.display(),
        strip.width(),
        strip.height()
    );
    Ok(())
}
