//! Coordinate types and validation constants.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Minimum zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum zoom level supported by the tile grid.
pub const MAX_ZOOM: u8 = 19;

/// Latitude limit of the Web Mercator tile grid (degrees).
///
/// Latitudes between this value and the poles are valid geographic
/// coordinates but fall outside the square tile grid.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

/// Minimum longitude (inclusive).
pub const MIN_LON: f64 = -180.0;

/// Maximum longitude (exclusive).
pub const MAX_LON: f64 = 180.0;

/// Errors produced by coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude at or beyond the poles, longitude outside [-180, 180),
    /// or a non-finite value.
    #[error("Invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Zoom level above [`MAX_ZOOM`].
    #[error("Invalid zoom level: {0} (max: {max})", max = MAX_ZOOM)]
    InvalidZoom(u8),

    /// The coordinate is valid but lies outside the tile grid. The raw,
    /// unclamped indices are reported as computed.
    #[error("Coordinate maps outside the tile grid at zoom {zoom}: x={x}, y={y}")]
    OutsideTileGrid { x: i64, y: i64, zoom: u8 },
}

/// A WGS84 geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// Latitude must lie strictly between the poles and longitude in
    /// `[-180, 180)`. Non-finite values are rejected.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        validate(lat, lon)?;
        Ok(Self { lat, lon })
    }

    /// Creates a validated coordinate from GeoJSON `(lon, lat)` ordering.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, CoordError> {
        Self::new(lat, lon)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Checks that a latitude/longitude pair can be projected.
pub(crate) fn validate(lat: f64, lon: f64) -> Result<(), CoordError> {
    let lat_ok = lat.is_finite() && lat > -90.0 && lat < 90.0;
    let lon_ok = lon.is_finite() && (MIN_LON..MAX_LON).contains(&lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(CoordError::InvalidCoordinate { lat, lon })
    }
}

/// Index of a slippy-map tile in the Web Mercator grid.
///
/// - `x`: column, 0 to 2^zoom - 1, west to east
/// - `y`: row, 0 to 2^zoom - 1, north to south
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    /// Creates a tile index, checking zoom and grid range.
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self, CoordError> {
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        let n = tiles_per_axis(zoom).ok_or(CoordError::InvalidZoom(zoom))?;
        if x >= n || y >= n {
            return Err(CoordError::OutsideTileGrid {
                x: x as i64,
                y: y as i64,
                zoom,
            });
        }
        Ok(Self { x, y, zoom })
    }

    /// Returns the geographic footprint of this tile.
    #[inline]
    pub fn bounds(&self) -> TileCorners {
        super::tile_bounds(self.x, self.y, self.zoom)
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Number of tiles along each axis at the given zoom level.
///
/// `None` when `2^zoom` does not fit in a `u32` (zoom 32 and above).
#[inline]
pub fn tiles_per_axis(zoom: u8) -> Option<u32> {
    1u32.checked_shl(u32::from(zoom))
}

/// The four geographic corners of one raster tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileCorners {
    pub top_left: GeoCoordinate,
    pub top_right: GeoCoordinate,
    pub bottom_left: GeoCoordinate,
    pub bottom_right: GeoCoordinate,
}

impl TileCorners {
    /// Longitude extent covered by the tile.
    pub fn lon_span(&self) -> f64 {
        self.top_right.lon - self.top_left.lon
    }

    /// Latitude extent covered by the tile, measured top to bottom.
    ///
    /// Negative for a well-formed tile since latitude decreases southward.
    pub fn lat_span(&self) -> f64 {
        self.bottom_left.lat - self.top_left.lat
    }

    /// Returns `true` if `point` lies inside the footprint.
    ///
    /// The west and north edges are inclusive, east and south exclusive,
    /// matching which tile [`super::geo_to_tile`] assigns a point to.
    pub fn contains(&self, point: &GeoCoordinate) -> bool {
        point.lon >= self.top_left.lon
            && point.lon < self.top_right.lon
            && point.lat <= self.top_left.lat
            && point.lat > self.bottom_left.lat
    }

    /// Renders the footprint as a closed WKT polygon in `lon lat` order.
    pub fn to_wkt(&self) -> String {
        let ring = [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
            self.top_left,
        ];
        let points: Vec<String> = ring
            .iter()
            .map(|c| format!("{} {}", c.lon, c.lat))
            .collect();
        format!("POLYGON(({}))", points.join(", "))
    }
}
