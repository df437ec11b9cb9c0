//! poitile CLI - Command-line interface
//!
//! Locates the satellite tile containing a point of interest, maps
//! coordinates to pixels within it, and annotates the tile with the POI
//! and its nearby road.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use poitile::config::ConfigFile;
use poitile::logging;

use commands::annotate::AnnotateArgs;
use commands::common::{parse_pair, PointOrder};
use commands::config::ConfigCommands;
use commands::pixel::PixelArgs;
use commands::tile::TileArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "poitile")]
#[command(version = poitile::VERSION)]
#[command(about = "Locate POIs on satellite map tiles and annotate them", long_about = None)]
struct Cli {
    /// Also write logs to this file (overrides logging.file in config)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tile containing a coordinate and its corners
    Tile {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Zoom level (default: tile.zoom from config)
        #[arg(long)]
        zoom: Option<u8>,

        /// Print the tile footprint as a WKT polygon instead of JSON
        #[arg(long)]
        wkt: bool,
    },

    /// Print the pixel position of a target inside the POI's tile
    Pixel {
        /// POI latitude selecting the tile
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// POI longitude selecting the tile
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Latitude of the point to position
        #[arg(long, allow_negative_numbers = true)]
        target_lat: f64,

        /// Longitude of the point to position
        #[arg(long, allow_negative_numbers = true)]
        target_lon: f64,

        /// Zoom level (default: tile.zoom from config)
        #[arg(long)]
        zoom: Option<u8>,

        /// Tile edge length in pixels (default: provider.tile_size from config)
        #[arg(long)]
        size: Option<u32>,
    },

    /// Draw a POI and its road onto the POI's tile and save the result
    Annotate {
        /// POI latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// POI longitude
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Road vertex as a coordinate pair; repeat for each vertex in order
        #[arg(long, value_name = "PAIR", allow_hyphen_values = true, value_parser = parse_pair)]
        road: Vec<(f64, f64)>,

        /// Axis order of the --road pairs
        #[arg(long, value_enum, default_value = "lat-lon")]
        road_order: PointOrder,

        /// Zoom level (default: tile.zoom from config)
        #[arg(long)]
        zoom: Option<u8>,

        /// Annotate this local tile image instead of downloading it
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,

        /// Where to write the annotated image
        #[arg(long, short, value_name = "PATH")]
        output: PathBuf,

        /// HERE API key (overrides config and POITILE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = ConfigFile::load();

    let log_file = cli
        .log_file
        .or_else(|| config.as_ref().ok().and_then(|c| c.log_file.clone()));
    let _log_guard = logging::init_logging(log_file.as_deref())?;

    match cli.command {
        Commands::Tile {
            lat,
            lon,
            zoom,
            wkt,
        } => commands::tile::run(TileArgs { lat, lon, zoom, wkt }, &config?),
        Commands::Pixel {
            lat,
            lon,
            target_lat,
            target_lon,
            zoom,
            size,
        } => commands::pixel::run(
            PixelArgs {
                lat,
                lon,
                target_lat,
                target_lon,
                zoom,
                size,
            },
            &config?,
        ),
        Commands::Annotate {
            lat,
            lon,
            road,
            road_order,
            zoom,
            image,
            output,
            api_key,
        } => commands::annotate::run(
            AnnotateArgs {
                lat,
                lon,
                road,
                road_order,
                zoom,
                image,
                output,
                api_key,
            },
            &config?,
        ),
        Commands::Config { command } => commands::config::run(command),
    }
}
