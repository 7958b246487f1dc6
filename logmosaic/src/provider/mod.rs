//! Map fragment source abstraction
//!
//! This module provides the trait and implementations for fetching
//! rendered map fragments centered on a coordinate, plus the request
//! types describing one fragment.
//!
//! The compositor consumes any [`TileSource`]; the production
//! implementation is [`StaticMapsSource`] over a blocking HTTP client,
//! usually wrapped in a [`crate::cache::CachingSource`].

mod http;
mod request;
mod staticmaps;

pub use http::{HttpClient, ReqwestClient};
pub use request::{FragmentRequest, MapScale, MapStyle};
pub use staticmaps::StaticMapsSource;

#[cfg(test)]
pub use http::tests::MockHttpClient;

use image::RgbaImage;
use thiserror::Error;

/// Capability to fetch one rendered map fragment.
///
/// Implementations are synchronous; a fetch blocks until the fragment is
/// available or failed. Callers treat any error as fatal for the
/// operation in progress.
pub trait TileSource: Send + Sync {
    /// Fetch the fragment described by `request` as an RGBA raster.
    fn fetch(&self, request: &FragmentRequest) -> Result<RgbaImage, FetchError>;
}

/// Boxed sources are sources, so callers can pick an implementation at
/// runtime (with or without the caching layer).
impl TileSource for Box<dyn TileSource> {
    fn fetch(&self, request: &FragmentRequest) -> Result<RgbaImage, FetchError> {
        self.as_ref().fetch(request)
    }
}

/// Errors that can occur while fetching a map fragment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not a decodable image.
    #[error("Decode error: {0}")]
    Decode(String),
}
