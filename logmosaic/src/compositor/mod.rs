//! Multi-zoom mosaic compositing.
//!
//! The compositor stacks one warped band per zoom level onto a shared
//! log-polar canvas: coarse levels at the top, deep levels toward the
//! bottom, each band blended over its neighbors through a feathered
//! alpha mask. The result is a single image whose resolution grows
//! continuously from world scale down to street scale.
//!
//! [`MosaicRequest`] describes what to render, [`MosaicCompositor`]
//! does the work over an injected [`TileSource`].
//!
//! [`TileSource`]: crate::provider::TileSource

mod blend;
mod engine;
mod request;

pub use engine::{MosaicCompositor, MosaicError, ProgressFn};
pub use request::{ConfigError, MosaicRequest, ProjectionMode, ZoomRange};
