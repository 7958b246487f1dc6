//! Render command - fetch fragments at every zoom level and stitch the
//! full mosaic.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use logmosaic::cache::{default_cache_dir, CachingSource};
use logmosaic::provider::{ReqwestClient, StaticMapsSource};
use logmosaic::{MosaicCompositor, MosaicRequest, TileSource, ZoomRange};
use tracing::warn;

use super::common::{self, ProjectionArg, ScaleArg, StyleArg};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Latitude of the mosaic center in decimal degrees
    pub lat: f64,

    /// Longitude of the mosaic center in decimal degrees
    pub lon: f64,

    /// Output PNG path [default: logmosaic_{LAT}_{LON}.png]
    pub output: Option<PathBuf>,

    /// Zoom levels to stack, coarsest first
    #[arg(
        short = 'z',
        long,
        value_name = "Z0:Z1",
        value_parser = common::parse_zoom_range,
        default_value = "0:19"
    )]
    pub zoom_levels: ZoomRange,

    /// Map style to request
    #[arg(short = 't', long = "map-type", value_enum, default_value = "satellite")]
    pub map_type: StyleArg,

    /// Band alignment mode
    #[arg(short = 'p', long, value_enum, default_value = "orthographic")]
    pub projection: ProjectionArg,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = 2048)]
    pub width: u32,

    /// Mesh grid step in output pixels
    #[arg(long, default_value_t = 8)]
    pub mesh_step: u32,

    /// Feather gradient width at fragment edges, in pixels
    #[arg(long, default_value_t = 10)]
    pub alpha_gradient_size: u32,

    /// Hard-transparent margin at each fragment's bottom edge, in pixels
    #[arg(long, default_value_t = 20)]
    pub bottom_margin: u32,

    /// Fragment dimensions requested from the map service
    #[arg(
        long,
        value_name = "W:H",
        value_parser = common::parse_size,
        default_value = "512:512"
    )]
    pub fragment_size: (u32, u32),

    /// Fragment resolution multiplier
    #[arg(long, value_enum, default_value = "2")]
    pub scale: ScaleArg,

    /// Google Static Maps API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Directory for the fragment cache
    #[arg(long, value_name = "DIR", conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Fetch every fragment from the network, bypassing the cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Run the render command.
pub fn run(args: RenderArgs) -> Result<(), CliError> {
    let request = MosaicRequest::new(args.lat, args.lon, args.zoom_levels)
        .with_style(args.map_type.into())
        .with_projection(args.projection.into())
        .with_out_width(args.width)
        .with_mesh_step(args.mesh_step)
        .with_gradient(args.alpha_gradient_size)
        .with_bottom_margin(args.bottom_margin)
        .with_fragment_size(args.fragment_size)
        .with_scale(args.scale.into());

    let source = build_source(&args)?;

    println!("Rendering mosaic for:");
    println!("  Location: {}, {}", args.lat, args.lon);
    println!(
        "  Zoom levels: {}:{}",
        args.zoom_levels.start(),
        args.zoom_levels.end()
    );
    println!("  Output width: {} px", args.width);

    let bar = progress_bar(args.zoom_levels);
    let compositor = MosaicCompositor::new(source).with_progress({
        let bar = bar.clone();
        move |zoom, _band, _bands| {
            bar.set_message(format!("zoom {}", zoom));
            bar.inc(1);
        }
    });

    let mosaic = compositor.render(&request)?;
    bar.finish_and_clear();

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("logmosaic_{}_{}.png", args.lat, args.lon))
    });
    common::save_image(&mosaic, &output)?;

    println!(
        "Saved {} ({}x{} px)",
        output.display(),
        mosaic.width(),
        mosaic.height()
    );
    Ok(())
}

/// Tile source per the cache flags: cached by default, direct network
/// on --no-cache or when the cache directory cannot be created.
fn build_source(args: &RenderArgs) -> Result<Box<dyn TileSource>, CliError> {
    let source = network_source(args.api_key.as_deref())?;
    if args.no_cache {
        return Ok(Box::new(source));
    }

    let dir = args.cache_dir.clone().unwrap_or_else(default_cache_dir);
    match CachingSource::new(source, &dir) {
        Ok(cached) => Ok(Box::new(cached)),
        Err(e) => {
            warn!(
                error = %e,
                dir = %dir.display(),
                "cache directory unavailable, fetching everything from the network"
            );
            Ok(Box::new(network_source(args.api_key.as_deref())?))
        }
    }
}

fn network_source(api_key: Option<&str>) -> Result<StaticMapsSource<ReqwestClient>, CliError> {
    let client = ReqwestClient::new()?;
    let source = StaticMapsSource::new(client);
    Ok(match api_key {
        Some(key) => source.with_api_key(key),
        None => source,
    })
}

fn progress_bar(zoom_levels: ZoomRange) -> ProgressBar {
    let bar = ProgressBar::new(u64::from(zoom_levels.count()));
    bar.set_style(
        ProgressStyle::with_template("[{bar:30}] band {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    bar
}
