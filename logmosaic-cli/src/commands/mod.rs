//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and a
//! `run` handler that maps onto a library entry point.

pub mod cache;
pub mod common;
pub mod fetch;
pub mod logpolar;
pub mod ortho;
pub mod render;
pub mod unlog;
