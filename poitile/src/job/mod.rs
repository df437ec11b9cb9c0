//! End-to-end annotation of one POI tile.
//!
//! An [`AnnotationJob`] locates the tile containing a POI, fetches and
//! decodes it from a [`TileSource`], then draws the nearby road and the
//! POI onto the raster:
//!
//! 1. road polyline, one segment per consecutive pair of points
//! 2. POI marker
//! 3. reference marker at the first road point
//!
//! Jobs are independent; [`annotate_batch`] runs many of them in parallel,
//! each on its own raster.

use image::RgbaImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::annotate::{AnnotationConfig, Annotator, Canvas};
use crate::coord::{coordinate_to_tile, CoordError, GeoCoordinate, TileCorners, TileIndex};
use crate::pixel::PixelPosition;
use crate::provider::{HereProvider, HttpClient, Provider, ProviderError};
use crate::raster::{self, RasterError};

/// Errors from running an annotation job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Coord(#[from] CoordError),

    #[error("Tile fetch failed: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Failure reported by a custom tile source.
    #[error("Tile source failed: {0}")]
    Source(String),
}

/// Anything that can supply the encoded image for a tile.
pub trait TileSource: Send + Sync {
    fn fetch(&self, tile: &TileIndex) -> Result<Vec<u8>, JobError>;
}

impl<C: HttpClient> TileSource for HereProvider<C> {
    fn fetch(&self, tile: &TileIndex) -> Result<Vec<u8>, JobError> {
        Ok(self.fetch_tile(tile)?)
    }
}

/// A POI, the road segment near it and the zoom to annotate at.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationJob {
    pub poi: GeoCoordinate,
    /// Road vertices in drawing order; the first one is the reference point.
    pub road: Vec<GeoCoordinate>,
    pub zoom: u8,
}

/// What was drawn by [`AnnotationJob::annotate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSummary {
    pub poi_pixel: PixelPosition,
    /// `None` when the road is empty.
    pub reference_pixel: Option<PixelPosition>,
    pub segments_drawn: usize,
}

/// Result of a full [`AnnotationJob::run`].
#[derive(Debug, Clone)]
pub struct AnnotationOutcome {
    pub tile: TileIndex,
    pub corners: TileCorners,
    pub image: RgbaImage,
    pub poi_pixel: PixelPosition,
    pub reference_pixel: Option<PixelPosition>,
    pub segments_drawn: usize,
}

impl AnnotationJob {
    pub fn new(poi: GeoCoordinate, road: Vec<GeoCoordinate>, zoom: u8) -> Self {
        Self { poi, road, zoom }
    }

    /// Tile containing the POI and its corner coordinates.
    pub fn locate(&self) -> Result<(TileIndex, TileCorners), JobError> {
        let tile = coordinate_to_tile(&self.poi, self.zoom)?;
        Ok((tile, tile.bounds()))
    }

    /// Fetches the POI's tile from `source` and annotates it.
    pub fn run<S: TileSource + ?Sized>(
        &self,
        source: &S,
        config: &AnnotationConfig,
    ) -> Result<AnnotationOutcome, JobError> {
        let (tile, corners) = self.locate()?;
        tracing::debug!(
            poi = %self.poi,
            tile = %tile,
            top_left = %corners.top_left,
            bottom_right = %corners.bottom_right,
            "Located POI tile"
        );

        let bytes = source.fetch(&tile)?;
        let mut image = raster::decode(&bytes)?;
        tracing::debug!(
            tile = %tile,
            width = image.width(),
            height = image.height(),
            "Tile decoded"
        );

        let summary = self.annotate(&mut image, &corners, config);
        tracing::info!(
            tile = %tile,
            segments = summary.segments_drawn,
            "Tile annotated"
        );

        Ok(AnnotationOutcome {
            tile,
            corners,
            image,
            poi_pixel: summary.poi_pixel,
            reference_pixel: summary.reference_pixel,
            segments_drawn: summary.segments_drawn,
        })
    }

    /// Draws the road and markers onto an already loaded tile.
    pub fn annotate<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        corners: &TileCorners,
        config: &AnnotationConfig,
    ) -> DrawSummary {
        let mut annotator = Annotator::new(canvas, *corners);

        let segments_drawn = annotator.draw_polyline(&self.road, &config.segment);
        let poi_pixel = annotator.draw_marker(&self.poi, &config.poi);
        let reference_pixel = self
            .road
            .first()
            .map(|reference| annotator.draw_marker(reference, &config.reference));

        DrawSummary {
            poi_pixel,
            reference_pixel,
            segments_drawn,
        }
    }
}

/// Runs independent jobs in parallel. Results keep the order of `jobs`.
pub fn annotate_batch<S: TileSource + ?Sized>(
    jobs: &[AnnotationJob],
    source: &S,
    config: &AnnotationConfig,
) -> Vec<Result<AnnotationOutcome, JobError>> {
    jobs.par_iter().map(|job| job.run(source, config)).collect()
}
