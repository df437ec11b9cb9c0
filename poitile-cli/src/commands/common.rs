//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use poitile::config::ConfigFile;
use poitile::coord::{CoordError, GeoCoordinate};

use crate::error::CliError;

/// Zoom level: CLI takes precedence, then config.
pub fn resolve_zoom(cli_zoom: Option<u8>, config: &ConfigFile) -> u8 {
    cli_zoom.unwrap_or(config.zoom)
}

/// Axis order of a coordinate pair given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PointOrder {
    /// LAT,LON
    LatLon,
    /// LON,LAT (GeoJSON order)
    LonLat,
}

impl PointOrder {
    /// Builds a validated coordinate from a pair in this order.
    pub fn to_coordinate(self, (first, second): (f64, f64)) -> Result<GeoCoordinate, CoordError> {
        match self {
            PointOrder::LatLon => GeoCoordinate::new(first, second),
            PointOrder::LonLat => GeoCoordinate::from_lon_lat(first, second),
        }
    }
}

/// Parses a comma-separated pair of numbers such as `19.27013,-99.64464`.
pub fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (first, second) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got '{}'", s))?;
    let number = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}'", part.trim()))
    };
    Ok((number(first)?, number(second)?))
}

/// Prints a value to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("19.27013,-99.64464").unwrap(), (19.27013, -99.64464));
        assert_eq!(parse_pair(" -33.9 , 18.4 ").unwrap(), (-33.9, 18.4));
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(parse_pair("19.27").is_err());
        assert!(parse_pair("north,-99.6").is_err());
    }

    #[test]
    fn test_point_order() {
        let lat_lon = PointOrder::LatLon.to_coordinate((19.27013, -99.64464)).unwrap();
        let lon_lat = PointOrder::LonLat.to_coordinate((-99.64464, 19.27013)).unwrap();
        assert_eq!(lat_lon, lon_lat);

        // 95 is a fine longitude but not a latitude
        assert!(PointOrder::LatLon.to_coordinate((95.0, 10.0)).is_err());
        assert!(PointOrder::LonLat.to_coordinate((95.0, 10.0)).is_ok());
    }

    #[test]
    fn test_resolve_zoom() {
        let config = ConfigFile::default();
        assert_eq!(resolve_zoom(Some(12), &config), 12);
        assert_eq!(resolve_zoom(None, &config), 16);
    }
}
