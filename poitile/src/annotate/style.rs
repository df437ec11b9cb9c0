//! Drawing styles for tile annotations.

use super::Color;

/// Default radius of a point marker, in pixels.
pub const DEFAULT_MARKER_RADIUS: f32 = 8.0;

/// Default radius of the markers drawn at segment endpoints, in pixels.
pub const DEFAULT_ENDPOINT_RADIUS: f32 = 5.0;

/// Default stroke width of a road segment, in pixels.
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;

/// Style of a filled circular point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub color: Color,
}

impl MarkerStyle {
    pub fn new(radius: f32, color: Color) -> Self {
        Self { radius, color }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_RADIUS, Color::RED)
    }
}

/// Style of a line segment and the markers drawn at both of its ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub line_width: f32,
    pub marker_radius: f32,
    pub color: Color,
}

impl SegmentStyle {
    /// Marker style used for the segment's endpoints.
    pub fn endpoint_marker(&self) -> MarkerStyle {
        MarkerStyle::new(self.marker_radius, self.color)
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_marker_radius(mut self, marker_radius: f32) -> Self {
        self.marker_radius = marker_radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            marker_radius: DEFAULT_ENDPOINT_RADIUS,
            color: Color::YELLOW,
        }
    }
}

/// Styles for a full annotation pass over one tile.
///
/// The road polyline is drawn with `segment`, the POI with `poi` and the
/// first road vertex with `reference`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationConfig {
    pub segment: SegmentStyle,
    pub poi: MarkerStyle,
    pub reference: MarkerStyle,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            segment: SegmentStyle::default(),
            poi: MarkerStyle::new(DEFAULT_MARKER_RADIUS, Color::RED),
            reference: MarkerStyle::new(DEFAULT_MARKER_RADIUS, Color::WHITE),
        }
    }
}
