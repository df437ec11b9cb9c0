//! Raster drawing primitives.
//!
//! [`Canvas`] is the seam between the annotator and the pixel buffer. The
//! `RgbaImage` implementation rasterizes with tiny-skia directly on the
//! image's bytes; tests substitute a recording canvas.

use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, PixmapMut, Stroke, Transform};

use super::Color;
use crate::pixel::PixelCoordinate;

/// A fixed-size surface that markers and lines can be drawn on.
///
/// Implementations clip anything outside `[0, width) × [0, height)` and
/// never change the surface dimensions.
pub trait Canvas {
    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Fills a circle centred at `center`.
    fn fill_circle(&mut self, center: PixelCoordinate, radius: f32, color: Color);

    /// Strokes a straight line from `from` to `to`.
    fn stroke_line(&mut self, from: PixelCoordinate, to: PixelCoordinate, width: f32, color: Color);
}

/// Builds a paint with anti-aliasing off so repeated draws are pixel-exact.
fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

/// Wraps the image bytes as a tiny-skia pixmap and runs `f` on it.
///
/// tiny-skia treats the bytes as premultiplied RGBA; this matches straight
/// RGBA for the opaque pixels of satellite tiles.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut PixmapMut<'_>)) {
    let (w, h) = img.dimensions();
    let Some(mut pixmap) = PixmapMut::from_bytes(&mut **img, w, h) else {
        tracing::debug!(width = w, height = h, "Skipping draw on empty raster");
        return;
    };
    f(&mut pixmap);
}

impl Canvas for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn fill_circle(&mut self, center: PixelCoordinate, radius: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) else {
            return;
        };
        let paint = solid_paint(color);
        with_pixmap(self, |pixmap| {
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        });
    }

    fn stroke_line(&mut self, from: PixelCoordinate, to: PixelCoordinate, width: f32, color: Color) {
        // tiny-skia treats a zero width as a hairline
        if !(width > 0.0) {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            line_cap: LineCap::Butt,
            ..Default::default()
        };
        with_pixmap(self, |pixmap| {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        });
    }
}
