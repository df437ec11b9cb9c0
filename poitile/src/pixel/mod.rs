//! Geographic to raster pixel mapping.
//!
//! Places a geographic coordinate on a tile's raster image by linear
//! interpolation along the tile's top edge (longitude → x) and left edge
//! (latitude → y).
//!
//! # Approximation
//!
//! The mapping treats the tile as a flat, axis-aligned rectangle. That is
//! not an exact Mercator reprojection: latitude spacing inside a tile is
//! not linear. The error is negligible for the small angular extent of a
//! single tile at the zoom levels used for POI work, and grows toward low
//! zoom levels and high latitudes.

use serde::Serialize;

use crate::coord::{GeoCoordinate, TileCorners};

/// A real-valued offset into a raster image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelCoordinate {
    pub x: f64,
    pub y: f64,
}

impl PixelCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of mapping a coordinate onto a tile raster.
///
/// When the tile has a zero longitude (or latitude) span, the matching axis
/// falls back to `0.0` and its `degenerate_*` flag is set. A degenerate
/// position is an unknown position, not a valid pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPosition {
    pub pixel: PixelCoordinate,
    pub degenerate_x: bool,
    pub degenerate_y: bool,
}

impl PixelPosition {
    /// Returns `true` if either axis fell back because of a zero span.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate_x || self.degenerate_y
    }

    /// Returns `true` if the pixel lies inside `[0, width) × [0, height)`.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        (0.0..width as f64).contains(&self.pixel.x) && (0.0..height as f64).contains(&self.pixel.y)
    }
}

/// Maps `target` onto the raster of a tile with the given corners.
///
/// ```text
/// x = (lon - top_left.lon) / (top_right.lon - top_left.lon) * width
/// y = (lat - top_left.lat) / (bottom_left.lat - top_left.lat) * height
/// ```
///
/// Targets outside the tile produce pixels outside the image; clipping is
/// left to the drawing primitive.
pub fn geo_to_pixel(
    corners: &TileCorners,
    target: &GeoCoordinate,
    width: u32,
    height: u32,
) -> PixelPosition {
    let (x_frac, degenerate_x) = fraction(target.lon - corners.top_left.lon, corners.lon_span());
    let (y_frac, degenerate_y) = fraction(target.lat - corners.top_left.lat, corners.lat_span());

    PixelPosition {
        pixel: PixelCoordinate {
            x: x_frac * width as f64,
            y: y_frac * height as f64,
        },
        degenerate_x,
        degenerate_y,
    }
}

/// Inverse of [`geo_to_pixel`] under the same affine approximation.
///
/// Returns `None` for a degenerate tile or an empty raster.
pub fn pixel_to_geo(
    corners: &TileCorners,
    pixel: &PixelCoordinate,
    width: u32,
    height: u32,
) -> Option<GeoCoordinate> {
    if width == 0 || height == 0 || corners.lon_span() == 0.0 || corners.lat_span() == 0.0 {
        return None;
    }

    let x_frac = pixel.x / width as f64;
    let y_frac = pixel.y / height as f64;

    Some(GeoCoordinate {
        lat: corners.top_left.lat + y_frac * corners.lat_span(),
        lon: corners.top_left.lon + x_frac * corners.lon_span(),
    })
}

#[inline]
fn fraction(offset: f64, span: f64) -> (f64, bool) {
    if span == 0.0 {
        (0.0, true)
    } else {
        (offset / span, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::tile_bounds;

    fn geo(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate { lat, lon }
    }

    fn sample_corners() -> TileCorners {
        TileCorners {
            top_left: geo(19.2706, -99.645),
            top_right: geo(19.2706, -99.640),
            bottom_left: geo(19.2701, -99.645),
            bottom_right: geo(19.2701, -99.640),
        }
    }

    #[test]
    fn test_sample_target_matches_manual_interpolation() {
        let corners = sample_corners();
        let target = geo(19.27055, -99.64272);

        let position = geo_to_pixel(&corners, &target, 512, 512);

        let x_frac = (-99.64272 - -99.645) / (-99.640 - -99.645);
        let y_frac = (19.27055 - 19.2706) / (19.2701 - 19.2706);
        assert!((position.pixel.x - x_frac * 512.0).abs() < 1e-9);
        assert!((position.pixel.y - y_frac * 512.0).abs() < 1e-9);

        // 45.6% across, 10% down
        assert!((position.pixel.x - 233.472).abs() < 1e-6);
        assert!((position.pixel.y - 51.2).abs() < 1e-6);

        assert!(position.is_within(512, 512));
        assert!(!position.is_degenerate());
    }

    #[test]
    fn test_corners_map_to_image_corners() {
        let corners = sample_corners();

        let tl = geo_to_pixel(&corners, &corners.top_left, 512, 256);
        assert_eq!(tl.pixel, PixelCoordinate::new(0.0, 0.0));

        let br = geo_to_pixel(&corners, &corners.bottom_right, 512, 256);
        assert!((br.pixel.x - 512.0).abs() < 1e-9);
        assert!((br.pixel.y - 256.0).abs() < 1e-9);
        assert!(!br.is_within(512, 256), "far edge is exclusive");
    }

    #[test]
    fn test_degenerate_longitude_span() {
        let mut corners = sample_corners();
        corners.top_right.lon = corners.top_left.lon;

        let position = geo_to_pixel(&corners, &geo(19.27055, -99.64272), 512, 512);

        assert_eq!(position.pixel.x, 0.0);
        assert!(position.degenerate_x);
        assert!(!position.degenerate_y);
        assert!(position.is_degenerate());
        assert!(position.pixel.y.is_finite());
    }

    #[test]
    fn test_degenerate_latitude_span() {
        let mut corners = sample_corners();
        corners.bottom_left.lat = corners.top_left.lat;

        let position = geo_to_pixel(&corners, &geo(19.27055, -99.64272), 512, 512);

        assert_eq!(position.pixel.y, 0.0);
        assert!(position.degenerate_y);
        assert!(!position.degenerate_x);
    }

    #[test]
    fn test_saturated_tile_is_degenerate() {
        let corners = tile_bounds(u32::MAX, 3, 4);
        let position = geo_to_pixel(&corners, &geo(0.0, 0.0), 512, 512);
        assert!(position.degenerate_x);
    }

    #[test]
    fn test_outside_target_is_outside_canvas() {
        let corners = sample_corners();
        let west = geo_to_pixel(&corners, &geo(19.2703, -99.650), 512, 512);
        assert!(west.pixel.x < 0.0);
        assert!(!west.is_within(512, 512));
        assert!(!west.is_degenerate());
    }

    #[test]
    fn test_pixel_to_geo_inverts_mapping() {
        let corners = tile_bounds(14628, 29191, 16);
        let target = geo(19.27055, -99.64272);

        let position = geo_to_pixel(&corners, &target, 512, 512);
        let back = pixel_to_geo(&corners, &position.pixel, 512, 512).unwrap();

        assert!((back.lat - target.lat).abs() < 1e-12);
        assert!((back.lon - target.lon).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_to_geo_degenerate() {
        let mut corners = sample_corners();
        corners.top_right.lon = corners.top_left.lon;
        assert!(pixel_to_geo(&corners, &PixelCoordinate::new(1.0, 1.0), 512, 512).is_none());
        assert!(pixel_to_geo(&sample_corners(), &PixelCoordinate::new(1.0, 1.0), 0, 512).is_none());
    }

    mod property_tests {
        use super::*;
        use crate::coord::{geo_to_tile, MAX_ZOOM};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_points_in_tile_land_on_canvas(
                lat in -85.0..85.0_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=MAX_ZOOM,
                size in 1u32..=1024
            ) {
                let tile = geo_to_tile(lat, lon, zoom)?;
                let corners = tile.bounds();
                let position = geo_to_pixel(&corners, &geo(lat, lon), size, size);

                // Affine latitude error stays within the tile
                let eps = 1e-6 * size as f64;
                prop_assert!(!position.is_degenerate());
                prop_assert!(position.pixel.x >= -eps && position.pixel.x <= size as f64 + eps);
                prop_assert!(position.pixel.y >= -eps && position.pixel.y <= size as f64 + eps);
            }
        }
    }
}
