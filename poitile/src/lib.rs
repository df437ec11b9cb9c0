//! poitile - Satellite tile georeferencing for POI annotation
//!
//! This library locates the Web Mercator tile containing a point of
//! interest, computes the geographic corners of that tile, maps coordinates
//! to pixels inside it, and draws the POI and its nearby road onto the
//! tile image.
//!
//! - [`coord`]: lat/lon to tile index and tile corner math
//! - [`pixel`]: geo to pixel interpolation within one tile
//! - [`annotate`]: markers and road segments on a raster
//! - [`provider`]: HERE Maps tile download
//! - [`job`]: fetch, decode and annotate in one step

pub mod annotate;
pub mod config;
pub mod coord;
pub mod job;
pub mod logging;
pub mod pixel;
pub mod provider;
pub mod raster;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
