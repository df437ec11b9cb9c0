//! Annotate command - draw a POI and its road onto the POI's tile.
//!
//! The tile is downloaded from HERE Maps unless a local image is given
//! with `--image`, in which case that image is treated as the POI's tile.

use std::path::PathBuf;

use poitile::config::ConfigFile;
use poitile::coord::{GeoCoordinate, TileIndex};
use poitile::job::AnnotationJob;
use poitile::pixel::PixelPosition;
use poitile::provider::{HereProvider, ReqwestClient};
use poitile::raster;

use super::common::{resolve_zoom, PointOrder};
use crate::error::CliError;

/// Arguments for the annotate command.
pub struct AnnotateArgs {
    pub lat: f64,
    pub lon: f64,
    pub road: Vec<(f64, f64)>,
    pub road_order: PointOrder,
    pub zoom: Option<u8>,
    pub image: Option<PathBuf>,
    pub output: PathBuf,
    pub api_key: Option<String>,
}

/// Run the annotate command.
pub fn run(args: AnnotateArgs, config: &ConfigFile) -> Result<(), CliError> {
    let poi = GeoCoordinate::new(args.lat, args.lon)?;
    let road = args
        .road
        .iter()
        .map(|&pair| args.road_order.to_coordinate(pair))
        .collect::<Result<Vec<_>, _>>()?;
    let job = AnnotationJob::new(poi, road, resolve_zoom(args.zoom, config));
    let styles = config.annotation_config();

    let (tile, poi_pixel, segments, (width, height)) = match args.image {
        Some(path) => {
            let mut image = raster::load(&path)?;
            let (tile, corners) = job.locate()?;
            let summary = job.annotate(&mut image, &corners, styles);
            raster::save(&image, &args.output)?;
            (tile, summary.poi_pixel, summary.segments_drawn, image.dimensions())
        }
        None => {
            let mut provider_config = config.provider_config().clone();
            if args.api_key.is_some() {
                provider_config.api_key = args.api_key;
            }
            let client = ReqwestClient::with_timeout(provider_config.timeout_secs)?;
            let provider = HereProvider::new(client, provider_config)?;

            let outcome = job.run(&provider, styles)?;
            raster::save(&outcome.image, &args.output)?;
            (
                outcome.tile,
                outcome.poi_pixel,
                outcome.segments_drawn,
                outcome.image.dimensions(),
            )
        }
    };

    print_summary(&tile, &poi_pixel, segments, width, height);
    println!("Saved: {}", args.output.display());
    Ok(())
}

fn print_summary(tile: &TileIndex, poi: &PixelPosition, segments: usize, width: u32, height: u32) {
    println!("Tile:     {}", tile);
    println!("Size:     {}x{}", width, height);
    println!("POI:      ({:.1}, {:.1})", poi.pixel.x, poi.pixel.y);
    println!("Segments: {}", segments);

    if poi.is_degenerate() {
        println!("Warning: tile has a zero-width span, POI marker not drawn");
    } else if !poi.is_within(width, height) {
        println!("Warning: POI lies outside the image, marker clipped");
    }
}
