//! Tile command - locate the tile containing a coordinate.

use serde::Serialize;

use poitile::config::ConfigFile;
use poitile::coord::{geo_to_tile, TileCorners, TileIndex};

use super::common::{print_json, resolve_zoom};
use crate::error::CliError;

/// Arguments for the tile command.
pub struct TileArgs {
    pub lat: f64,
    pub lon: f64,
    pub zoom: Option<u8>,
    pub wkt: bool,
}

#[derive(Serialize)]
struct TileReport {
    tile: TileIndex,
    corners: TileCorners,
}

/// Run the tile command.
pub fn run(args: TileArgs, config: &ConfigFile) -> Result<(), CliError> {
    let zoom = resolve_zoom(args.zoom, config);
    let tile = geo_to_tile(args.lat, args.lon, zoom)?;
    let corners = tile.bounds();
    tracing::debug!(tile = %tile, "Tile located");

    if args.wkt {
        println!("{}", corners.to_wkt());
        return Ok(());
    }

    print_json(&TileReport { tile, corners })
}
