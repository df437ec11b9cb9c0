//! Tile annotation.
//!
//! Draws POI markers and road segments onto a tile raster, positioning
//! each geographic coordinate with [`crate::pixel::geo_to_pixel`].
//!
//! # Drawing order
//!
//! An [`Annotator`] holds the canvas by exclusive borrow, so all drawing on
//! one raster happens sequentially. A full pass draws the road polyline
//! first (one segment per consecutive pair of points), then point markers.
//!
//! # Example
//!
//! ```
//! use image::RgbaImage;
//! use poitile::annotate::{Annotator, MarkerStyle, SegmentStyle};
//! use poitile::coord::{geo_to_tile, GeoCoordinate};
//!
//! let tile = geo_to_tile(19.27055, -99.64272, 16).unwrap();
//! let mut image = RgbaImage::new(512, 512);
//!
//! let road = [
//!     GeoCoordinate::new(19.27013, -99.64464).unwrap(),
//!     GeoCoordinate::new(19.27055, -99.64272).unwrap(),
//! ];
//!
//! let mut annotator = Annotator::new(&mut image, tile.bounds());
//! assert_eq!(annotator.draw_polyline(&road, &SegmentStyle::default()), 1);
//! let poi = annotator.draw_marker(&road[1], &MarkerStyle::default());
//! assert!(poi.is_within(512, 512));
//! ```

mod canvas;
mod color;
mod style;

pub use canvas::Canvas;
pub use color::{Color, ColorParseError};
pub use style::{
    AnnotationConfig, MarkerStyle, SegmentStyle, DEFAULT_ENDPOINT_RADIUS, DEFAULT_LINE_WIDTH,
    DEFAULT_MARKER_RADIUS,
};

use crate::coord::{GeoCoordinate, TileCorners};
use crate::pixel::{geo_to_pixel, PixelPosition};

/// Pixel positions of a drawn segment's endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPixels {
    pub start: PixelPosition,
    pub end: PixelPosition,
}

impl SegmentPixels {
    /// Returns `true` if the segment was skipped because an endpoint could
    /// not be positioned.
    pub fn is_degenerate(&self) -> bool {
        self.start.is_degenerate() || self.end.is_degenerate()
    }
}

/// Draws geographic annotations onto one tile's canvas.
pub struct Annotator<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    corners: TileCorners,
}

impl<'a, C: Canvas + ?Sized> Annotator<'a, C> {
    /// Creates an annotator for a canvas showing the tile with `corners`.
    pub fn new(canvas: &'a mut C, corners: TileCorners) -> Self {
        Self { canvas, corners }
    }

    /// Corners of the tile being annotated.
    pub fn corners(&self) -> &TileCorners {
        &self.corners
    }

    /// Maps a coordinate onto this canvas without drawing.
    pub fn locate(&self, target: &GeoCoordinate) -> PixelPosition {
        let (width, height) = self.canvas.dimensions();
        geo_to_pixel(&self.corners, target, width, height)
    }

    /// Draws a filled circular marker at `target`.
    ///
    /// Markers outside the canvas are clipped. A degenerate position is not
    /// drawn; the returned position carries the flag for the caller.
    pub fn draw_marker(&mut self, target: &GeoCoordinate, style: &MarkerStyle) -> PixelPosition {
        let position = self.locate(target);
        if position.is_degenerate() {
            tracing::warn!(
                lat = target.lat,
                lon = target.lon,
                "Skipping marker: tile has a zero-width span"
            );
            return position;
        }

        self.canvas
            .fill_circle(position.pixel, style.radius, style.color);
        position
    }

    /// Draws a line from `start` to `end`, then a marker at each endpoint.
    pub fn draw_segment(
        &mut self,
        start: &GeoCoordinate,
        end: &GeoCoordinate,
        style: &SegmentStyle,
    ) -> SegmentPixels {
        let pixels = SegmentPixels {
            start: self.locate(start),
            end: self.locate(end),
        };
        if pixels.is_degenerate() {
            tracing::warn!(%start, %end, "Skipping segment: tile has a zero-width span");
            return pixels;
        }

        self.canvas.stroke_line(
            pixels.start.pixel,
            pixels.end.pixel,
            style.line_width,
            style.color,
        );

        let marker = style.endpoint_marker();
        for endpoint in [pixels.start, pixels.end] {
            self.canvas
                .fill_circle(endpoint.pixel, marker.radius, marker.color);
        }

        pixels
    }

    /// Draws a connected polyline, one segment per consecutive pair.
    ///
    /// Returns the number of segments drawn; fewer than two points draw
    /// nothing.
    pub fn draw_polyline(&mut self, points: &[GeoCoordinate], style: &SegmentStyle) -> usize {
        let mut drawn = 0;
        for pair in points.windows(2) {
            if !self.draw_segment(&pair[0], &pair[1], style).is_degenerate() {
                drawn += 1;
            }
        }
        drawn
    }
}
