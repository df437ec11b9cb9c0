//! Integration tests for POI tile annotation.
//!
//! These tests drive the complete flow through the public API:
//! - POI → tile index and corners
//! - tile download through a HERE provider backed by a fake HTTP client
//! - decode, annotate and save the tile
//!
//! Run with: `cargo test --test annotation_integration`

use std::sync::Mutex;

use image::{Rgba, RgbaImage};

use poitile::annotate::{AnnotationConfig, Color};
use poitile::config::ConfigFile;
use poitile::coord::{geo_to_tile, tile_bounds, GeoCoordinate, TileIndex};
use poitile::job::{annotate_batch, AnnotationJob, JobError};
use poitile::pixel::geo_to_pixel;
use poitile::provider::{HereProvider, HttpClient, ProviderConfig, ProviderError};
use poitile::raster;

// ============================================================================
// Helper Functions
// ============================================================================

const GROUND: Rgba<u8> = Rgba([34, 70, 34, 255]);

/// HTTP client that serves a fixed PNG and records requested URLs.
struct FakeTileServer {
    png: Vec<u8>,
    urls: Mutex<Vec<String>>,
}

impl FakeTileServer {
    fn new(size: u32) -> Self {
        let tile = RgbaImage::from_pixel(size, size, GROUND);
        Self {
            png: raster::encode_png(&tile).unwrap(),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl HttpClient for FakeTileServer {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.png.clone())
    }
}

impl HttpClient for &FakeTileServer {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        (**self).get(url)
    }
}

fn geo(lat: f64, lon: f64) -> GeoCoordinate {
    GeoCoordinate::new(lat, lon).unwrap()
}

/// POI and road near Toluca, Mexico.
fn toluca_job() -> AnnotationJob {
    AnnotationJob::new(
        geo(19.27055, -99.64272),
        vec![
            geo(19.27013, -99.64464),
            geo(19.27055, -99.64272),
            geo(19.27090, -99.64180),
        ],
        16,
    )
}

// ============================================================================
// Integration Tests
// ============================================================================

/// POI and first road vertex fall in the same zoom 16 tile.
#[test]
fn test_poi_and_road_share_tile() {
    let poi = geo_to_tile(19.27055, -99.64272, 16).unwrap();
    let road = geo_to_tile(19.27013, -99.64464, 16).unwrap();

    assert_eq!(poi, road);
    assert_eq!(poi, TileIndex::new(14628, 29191, 16).unwrap());
}

/// Full job: fetch through the HERE provider, annotate, save, reload.
#[test]
fn test_full_annotation_job() {
    let server = FakeTileServer::new(512);
    let provider = HereProvider::new(&server, ProviderConfig::with_api_key("test-key")).unwrap();
    let job = toluca_job();

    let outcome = job.run(&provider, &AnnotationConfig::default()).unwrap();

    assert_eq!(
        server.urls(),
        vec![
            "https://maps.hereapi.com/v3/base/mc/16/14628/29191/png?style=satellite.day&size=512&apiKey=test-key"
        ]
    );
    assert_eq!(outcome.corners, tile_bounds(14628, 29191, 16));
    assert_eq!(outcome.segments_drawn, 2);
    assert_eq!(
        outcome.poi_pixel,
        geo_to_pixel(&outcome.corners, &job.poi, 512, 512)
    );

    let poi = outcome.poi_pixel.pixel;
    assert_eq!(
        *outcome.image.get_pixel(poi.x as u32, poi.y as u32),
        Rgba([255, 0, 0, 255])
    );

    let reference = outcome.reference_pixel.unwrap().pixel;
    assert_eq!(
        *outcome.image.get_pixel(reference.x as u32, reference.y as u32),
        Rgba([255, 255, 255, 255])
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotated.png");
    raster::save(&outcome.image, &path).unwrap();
    let reloaded = raster::load(&path).unwrap();
    assert_eq!(reloaded, outcome.image);
}

/// Styles loaded from a config file reach the drawn pixels.
#[test]
fn test_job_uses_configured_styles() {
    let config = ConfigFile::parse(
        "[annotation]\npoi_color = blue\nreference_color = #00ff00\nmarker_radius = 6\n",
    )
    .unwrap();
    let server = FakeTileServer::new(256);
    let provider = HereProvider::new(
        &server,
        ProviderConfig::with_api_key("k").tile_size(256),
    )
    .unwrap();

    let outcome = toluca_job()
        .run(&provider, config.annotation_config())
        .unwrap();

    assert_eq!(outcome.image.dimensions(), (256, 256));
    let poi = outcome.poi_pixel.pixel;
    assert_eq!(
        *outcome.image.get_pixel(poi.x as u32, poi.y as u32),
        Rgba(Color::BLUE.to_rgba_u8())
    );
    let reference = outcome.reference_pixel.unwrap().pixel;
    assert_eq!(
        *outcome.image.get_pixel(reference.x as u32, reference.y as u32),
        Rgba([0, 255, 0, 255])
    );
}

/// Annotating a local image twice gives the same pixels as once.
#[test]
fn test_local_annotation_is_idempotent() {
    let job = toluca_job();
    let (_, corners) = job.locate().unwrap();
    let config = AnnotationConfig::default();
    let background = RgbaImage::from_pixel(512, 512, GROUND);

    let mut once = background.clone();
    job.annotate(&mut once, &corners, &config);

    let mut twice = once.clone();
    job.annotate(&mut twice, &corners, &config);

    assert_ne!(once, background);
    assert_eq!(once, twice);
}

/// Batch jobs each fetch their own tile; bad jobs fail alone.
#[test]
fn test_batch_annotation() {
    let server = FakeTileServer::new(64);
    let provider = HereProvider::new(&server, ProviderConfig::with_api_key("k")).unwrap();

    let polar = AnnotationJob::new(geo(89.0, 10.0), Vec::new(), 16);
    let jobs = vec![toluca_job(), polar];

    let results = annotate_batch(&jobs, &provider, &AnnotationConfig::default());

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(JobError::Coord(_))));
    assert_eq!(server.urls().len(), 1);
}
