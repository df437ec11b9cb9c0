//! CLI error type.

use std::fmt;

use poitile::config::ConfigError;
use poitile::coord::CoordError;
use poitile::job::JobError;
use poitile::logging::LoggingError;
use poitile::provider::ProviderError;
use poitile::raster::RasterError;

/// Errors reported by CLI commands. Any of them exits with status 1.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be read, parsed or written.
    Config(String),

    /// Bad coordinate or zoom level.
    Coord(CoordError),

    /// Tile provider could not be set up.
    Provider(ProviderError),

    /// Annotation job failed.
    Job(JobError),

    /// Image could not be loaded or saved.
    Raster(RasterError),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// Malformed command-line argument.
    InvalidArgument(String),

    /// Result could not be written to stdout.
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Coord(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Provider error: {}", e),
            CliError::Job(e) => write!(f, "Annotation failed: {}", e),
            CliError::Raster(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Output(msg) => write!(f, "Failed to write output: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Coord(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Job(e) => Some(e),
            CliError::Raster(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Config(_) | CliError::InvalidArgument(_) | CliError::Output(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coord(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<JobError> for CliError {
    fn from(e: JobError) -> Self {
        CliError::Job(e)
    }
}

impl From<RasterError> for CliError {
    fn from(e: RasterError) -> Self {
        CliError::Raster(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
