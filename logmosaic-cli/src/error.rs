//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use logmosaic::coord::CoordError;
use logmosaic::provider::FetchError;
use logmosaic::MosaicError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Invalid coordinate or zoom argument
    Coord(CoordError),
    /// Mosaic rendering failed
    Render(MosaicError),
    /// Fragment download failed
    Fetch(FetchError),
    /// Failed to read an input image
    ImageRead {
        path: String,
        error: image::ImageError,
    },
    /// Failed to write an output image
    ImageWrite {
        path: String,
        error: image::ImageError,
    },
    /// Cache maintenance failed
    Cache(std::io::Error),
}

impl CliError {
    /// Exit the process with an error line on stderr and code 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Coord(e) => write!(f, "{}", e),
            CliError::Render(e) => write!(f, "Failed to render mosaic: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch fragment: {}", e),
            CliError::ImageRead { path, error } => {
                write!(f, "Failed to read image '{}': {}", path, error)
            }
            CliError::ImageWrite { path, error } => {
                write!(f, "Failed to write image '{}': {}", path, error)
            }
            CliError::Cache(e) => write!(f, "Cache operation failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Coord(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::ImageRead { error, .. } => Some(error),
            CliError::ImageWrite { error, .. } => Some(error),
            CliError::Cache(e) => Some(e),
        }
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coord(e)
    }
}

impl From<MosaicError> for CliError {
    fn from(e: MosaicError) -> Self {
        CliError::Render(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetch(e)
    }
}
