//! Cache management CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use logmosaic::cache::{cache_stats, clear_cache, default_cache_dir};

use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Clear the fragment cache, removing all cached fragments
    Clear,
    /// Show fragment cache statistics
    Stats,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction, dir: Option<PathBuf>) -> Result<(), CliError> {
    let dir = dir.unwrap_or_else(default_cache_dir);

    match action {
        CacheAction::Clear => {
            println!("Clearing fragment cache at: {}", dir.display());

            let removed = clear_cache(&dir).map_err(CliError::Cache)?;
            println!("Deleted {} files", removed);
            Ok(())
        }
        CacheAction::Stats => {
            println!("Fragment cache: {}", dir.display());

            let stats = cache_stats(&dir).map_err(CliError::Cache)?;
            println!("  Files: {}", stats.files);
            println!("  Size:  {}", format_size(stats.bytes));
            Ok(())
        }
    }
}

/// Format a size in bytes as a human-readable string.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
