//! LogMosaic CLI - command-line interface to the mosaic library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod error;

use commands::{cache, fetch, logpolar, ortho, render, unlog};

#[derive(Parser)]
#[command(name = "logmosaic", version = logmosaic::VERSION)]
#[command(about = "Wide-field log-polar map mosaics", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a multi-zoom mosaic centered on a coordinate
    Render(render::RenderArgs),
    /// Download a single map fragment
    Fetch(fetch::FetchArgs),
    /// Log-polar transform of a local image
    Logpolar(logpolar::LogpolarArgs),
    /// Inverse log-polar transform of a local strip
    Unlog(unlog::UnlogArgs),
    /// Mercator to orthographic re-projection of a local image
    Ortho(ortho::OrthoArgs),
    /// Fragment cache maintenance
    Cache {
        /// Cache directory [default: the platform cache dir]
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: cache::CacheAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_directive = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    logmosaic::logging::init_with_default(default_directive);

    let result = match cli.command {
        Commands::Render(args) => render::run(args),
        Commands::Fetch(args) => fetch::run(args),
        Commands::Logpolar(args) => logpolar::run(args),
        Commands::Unlog(args) => unlog::run(args),
        Commands::Ortho(args) => ortho::run(args),
        Commands::Cache { cache_dir, action } => cache::run(action, cache_dir),
    };

    if let Err(e) = result {
        e.exit();
    }
}
