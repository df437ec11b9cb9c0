//! Pixel command - position a target coordinate inside a POI's tile.

use serde::Serialize;

use poitile::config::ConfigFile;
use poitile::coord::{geo_to_tile, GeoCoordinate, TileIndex};
use poitile::pixel::{geo_to_pixel, PixelCoordinate};

use super::common::{print_json, resolve_zoom};
use crate::error::CliError;

/// Arguments for the pixel command.
pub struct PixelArgs {
    pub lat: f64,
    pub lon: f64,
    pub target_lat: f64,
    pub target_lon: f64,
    pub zoom: Option<u8>,
    pub size: Option<u32>,
}

#[derive(Serialize)]
struct PixelReport {
    tile: TileIndex,
    size: u32,
    pixel: PixelCoordinate,
    degenerate_x: bool,
    degenerate_y: bool,
    within_tile: bool,
}

/// Run the pixel command.
pub fn run(args: PixelArgs, config: &ConfigFile) -> Result<(), CliError> {
    let zoom = resolve_zoom(args.zoom, config);
    let size = args.size.unwrap_or(config.provider.tile_size);
    if size == 0 {
        return Err(CliError::InvalidArgument(
            "--size must be at least 1".to_string(),
        ));
    }

    let tile = geo_to_tile(args.lat, args.lon, zoom)?;
    let target = GeoCoordinate::new(args.target_lat, args.target_lon)?;
    let position = geo_to_pixel(&tile.bounds(), &target, size, size);

    if position.is_degenerate() {
        tracing::warn!(tile = %tile, "Tile has a zero-width span");
    }

    print_json(&PixelReport {
        tile,
        size,
        pixel: position.pixel,
        degenerate_x: position.degenerate_x,
        degenerate_y: position.degenerate_y,
        within_tile: position.is_within(size, size),
    })
}
