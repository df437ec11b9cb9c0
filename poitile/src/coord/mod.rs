//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator slippy-map tile indices, plus the geographic footprint
//! of a tile.

mod types;

pub use types::{
    tiles_per_axis, CoordError, GeoCoordinate, TileCorners, TileIndex, MAX_LON, MAX_ZOOM,
    MERCATOR_MAX_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile indices.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees, strictly between -90 and 90
/// * `lon` - Longitude in degrees, in `[-180, 180)`
/// * `zoom` - Zoom level (0 to 19)
///
/// # Errors
///
/// - [`CoordError::InvalidCoordinate`] for non-finite input or coordinates
///   outside the ranges above. Nothing is projected in that case.
/// - [`CoordError::InvalidZoom`] for zoom levels above [`MAX_ZOOM`].
/// - [`CoordError::OutsideTileGrid`] for latitudes beyond the Mercator limit
///   (about ±85.0511°). The indices are not clamped; the raw values are
///   carried in the error and validation is left to the caller.
#[inline]
pub fn geo_to_tile(lat: f64, lon: f64, zoom: u8) -> Result<TileIndex, CoordError> {
    types::validate(lat, lon)?;
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = tiles_per_axis(zoom).ok_or(CoordError::InvalidZoom(zoom))? as f64;

    let mut x = ((lon + 180.0) / 360.0 * n).floor() as i64;
    // lon + 180 rounds up to 360 for longitudes a few ulps below 180
    if x == n as i64 && lon < MAX_LON {
        x -= 1;
    }

    // ln(tan φ + sec φ) == asinh(tan φ)
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as i64;

    let max = n as i64;
    if !(0..max).contains(&x) || !(0..max).contains(&y) {
        return Err(CoordError::OutsideTileGrid { x, y, zoom });
    }

    Ok(TileIndex {
        x: x as u32,
        y: y as u32,
        zoom,
    })
}

/// Converts a geographic coordinate to its tile index.
#[inline]
pub fn coordinate_to_tile(coord: &GeoCoordinate, zoom: u8) -> Result<TileIndex, CoordError> {
    geo_to_tile(coord.lat, coord.lon, zoom)
}

/// Converts tile indices to the geographic coordinate of the tile's
/// northwest corner.
///
/// `x` and `y` may equal `2^zoom` to address the far (east/south) edge of
/// the last tile. Further out, `sinh` saturates to infinity and the
/// latitude settles at ±90°; the result is always finite.
#[inline]
pub fn tile_to_geo(x: u32, y: u32, zoom: u8) -> GeoCoordinate {
    let n = 2.0_f64.powi(zoom as i32);

    let lon = x as f64 / n * 360.0 - 180.0;

    let y = y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();

    GeoCoordinate {
        lat: lat_rad.to_degrees(),
        lon,
    }
}

/// Computes the four geographic corners of tile `(x, y)`.
///
/// The far corners are the northwest corners of the neighbouring tiles:
/// `(x+1, y)` is top-right, `(x+1, y+1)` bottom-right and `(x, y+1)`
/// bottom-left. Indices at `u32::MAX` saturate, which collapses the tile to
/// a zero span on that axis.
pub fn tile_bounds(x: u32, y: u32, zoom: u8) -> TileCorners {
    let top_left = tile_to_geo(x, y, zoom);
    let (east, south) = (x.saturating_add(1), y.saturating_add(1));
    let top_right = tile_to_geo(east, y, zoom);
    let bottom_right = tile_to_geo(east, south, zoom);
    let bottom_left = tile_to_geo(x, south, zoom);

    TileCorners {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}
