//! Satellite imagery provider abstraction
//!
//! This module provides the [`Provider`] trait and the HERE Maps
//! implementation used to download the raster tile a POI falls in.
//! Requests are made once; retry and backoff are left to the caller.
//!
//! ```ignore
//! use poitile::provider::{HereProvider, Provider, ProviderConfig, ReqwestClient};
//!
//! let config = ProviderConfig::with_api_key(key);
//! let client = ReqwestClient::with_timeout(config.timeout_secs)?;
//! let provider = HereProvider::new(client, config)?;
//! let png = provider.fetch_tile(&tile)?;
//! ```

mod here;
mod http;
mod types;

pub use here::HereProvider;
pub use http::{HttpClient, ReqwestClient};
pub use types::{
    Provider, ProviderConfig, ProviderError, DEFAULT_BASE_URL, DEFAULT_FORMAT, DEFAULT_STYLE,
    DEFAULT_TILE_SIZE, DEFAULT_TIMEOUT_SECS,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
