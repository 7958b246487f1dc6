//! Fetch command - download a single map fragment to a file.

use std::path::PathBuf;

use clap::Args;
use logmosaic::coord::{validate_coordinate, validate_zoom};
use logmosaic::provider::{FragmentRequest, ReqwestClient, StaticMapsSource};
use logmosaic::TileSource;

use super::common::{self, ScaleArg, StyleArg};
use crate::error::CliError;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Latitude of the fragment center in decimal degrees
    pub lat: f64,

    /// Longitude of the fragment center in decimal degrees
    pub lon: f64,

    /// Zoom level
    pub zoom: u8,

    /// Output image path
    pub output: PathBuf,

    /// Fragment dimensions in pixels
    #[arg(
        short = 's',
        long,
        value_name = "W:H",
        value_parser = common::parse_size,
        default_value = "512:512"
    )]
    pub size: (u32, u32),

    /// Fragment resolution multiplier
    #[arg(short = 'S', long, value_enum, default_value = "1")]
    pub scale: ScaleArg,

    /// Map style to request
    #[arg(short = 't', long = "type", value_enum, default_value = "satellite")]
    pub map_type: StyleArg,

    /// Google Static Maps API key
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Run the fetch command.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    validate_coordinate(args.lat, args.lon)?;
    validate_zoom(args.zoom)?;

    let request = FragmentRequest::new(args.lat, args.lon, args.zoom, args.size)
        .with_style(args.map_type.into())
        .with_scale(args.scale.into());

    let client = ReqwestClient::new()?;
    let source = StaticMapsSource::new(client);
    let source = match args.api_key {
        Some(key) => source.with_api_key(key),
        None => source,
    };

    println!("Fetching fragment for:");
    println!("  Location: {}, {}", args.lat, args.lon);
    println!("  Zoom: {}", args.zoom);

    let fragment = source.fetch(&request)?;
    common::save_image(&fragment, &args.output)?;

    println!(
        "Saved {} ({}x{} px)",
        args.output.display(),
        fragment.width(),
        fragment.height()
    );
    Ok(())
}
