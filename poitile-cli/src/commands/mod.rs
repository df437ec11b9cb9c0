//! CLI command implementations.

pub mod annotate;
pub mod common;
pub mod config;
pub mod pixel;
pub mod tile;
