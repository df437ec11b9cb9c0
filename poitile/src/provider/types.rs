//! Provider trait, configuration and error types.

use thiserror::Error;

use crate::coord::TileIndex;

/// Default HERE raster tile endpoint (Mercator base map).
pub const DEFAULT_BASE_URL: &str = "https://maps.hereapi.com/v3/base/mc";

/// Default map style.
pub const DEFAULT_STYLE: &str = "satellite.day";

/// Default image format requested from the tile server.
pub const DEFAULT_FORMAT: &str = "png";

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from tile providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network or HTTP-level failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Zoom level outside the provider's range.
    #[error("Unsupported zoom level: {0}")]
    UnsupportedZoom(u8),

    /// The provider needs an API key and none was configured.
    #[error("No API key configured for {0}")]
    MissingApiKey(String),

    /// Configuration value the provider cannot use.
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

/// Tile fetch configuration.
///
/// Passed explicitly to the provider; nothing is read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API key appended to every request.
    pub api_key: Option<String>,
    /// Endpoint up to (not including) the `/{zoom}/{x}/{y}` path.
    pub base_url: String,
    /// Map style, e.g. `satellite.day`.
    pub style: String,
    /// Image format, e.g. `png` or `jpeg`.
    pub format: String,
    /// Tile edge length in pixels (256 or 512).
    pub tile_size: u32,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            style: DEFAULT_STYLE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            tile_size: DEFAULT_TILE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Creates a config with defaults and the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Set the tile size.
    pub fn tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the map style.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the image format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A source of satellite imagery tiles.
pub trait Provider: Send + Sync {
    /// Downloads the encoded image for one tile.
    fn fetch_tile(&self, tile: &TileIndex) -> Result<Vec<u8>, ProviderError>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    fn min_zoom(&self) -> u8;

    fn max_zoom(&self) -> u8;

    /// Edge length of the returned tiles in pixels.
    fn tile_size(&self) -> u32;

    /// Returns `true` if `zoom` is within this provider's range.
    fn supports_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom()..=self.max_zoom()).contains(&zoom)
    }
}
