//! HERE Maps raster tile provider.
//!
//! # URL Pattern
//!
//! `{base}/{z}/{x}/{y}/{format}?style={style}&size={size}&apiKey={key}`
//!
//! with base `https://maps.hereapi.com/v3/base/mc`.
//!
//! - Standard XYZ tile coordinates (x = column, y = row)
//! - Requires an API key
//! - `size` selects 256 or 512 pixel tiles

use reqwest::Url;

use super::types::{Provider, ProviderConfig, ProviderError};
use super::HttpClient;
use crate::coord::TileIndex;

/// Minimum zoom level served by HERE raster tiles.
const MIN_ZOOM: u8 = 0;

/// Maximum zoom level served by HERE raster tiles.
const MAX_ZOOM: u8 = 19;

/// HERE Maps satellite tile provider.
///
/// # Example
///
/// ```ignore
/// use poitile::provider::{HereProvider, ProviderConfig, ReqwestClient};
///
/// let client = ReqwestClient::new()?;
/// let provider = HereProvider::new(client, ProviderConfig::with_api_key("..."))?;
/// let bytes = provider.fetch_tile(&tile)?;
/// ```
pub struct HereProvider<C: HttpClient> {
    http_client: C,
    config: ProviderConfig,
}

impl<C: HttpClient> HereProvider<C> {
    /// Creates a new HERE provider.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingApiKey`] if no non-empty key is configured
    /// - [`ProviderError::InvalidConfig`] for a tile size other than 256 or 512
    pub fn new(http_client: C, config: ProviderConfig) -> Result<Self, ProviderError> {
        let has_key = config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(ProviderError::MissingApiKey("HERE Maps".to_string()));
        }
        if !matches!(config.tile_size, 256 | 512) {
            return Err(ProviderError::InvalidConfig(format!(
                "tile size must be 256 or 512, got {}",
                config.tile_size
            )));
        }

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Builds the tile URL for the given tile, percent-encoding the query.
    fn build_url(&self, tile: &TileIndex) -> Result<String, ProviderError> {
        let endpoint = format!(
            "{}/{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            tile.zoom,
            tile.x,
            tile.y,
            self.config.format,
        );
        let size = self.config.tile_size.to_string();
        let params = [
            ("style", self.config.style.as_str()),
            ("size", size.as_str()),
            ("apiKey", self.config.api_key.as_deref().unwrap_or_default()),
        ];

        Url::parse_with_params(&endpoint, &params)
            .map(String::from)
            .map_err(|e| ProviderError::InvalidConfig(format!("invalid base URL: {}", e)))
    }
}

impl<C: HttpClient> Provider for HereProvider<C> {
    fn fetch_tile(&self, tile: &TileIndex) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }

        tracing::debug!(tile = %tile, style = %self.config.style, "Fetching tile");
        let url = self.build_url(tile)?;
        let bytes = self.http_client.get(&url)?;
        tracing::info!(tile = %tile, bytes = bytes.len(), "Tile fetched");
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "HERE Maps"
    }

    fn min_zoom(&self) -> u8 {
        MIN_ZOOM
    }

    fn max_zoom(&self) -> u8 {
        MAX_ZOOM
    }

    fn tile_size(&self) -> u32 {
        self.config.tile_size
    }
}
