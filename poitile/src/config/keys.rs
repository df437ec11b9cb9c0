//! Addressable configuration keys.
//!
//! Each key is named `section.key` (e.g. `provider.api_key`) and knows how to
//! read its value from, and write a string value into, a [`ConfigFile`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};
use crate::annotate::Color;
use crate::coord::MAX_ZOOM;

/// A single setting in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ProviderApiKey,
    ProviderBaseUrl,
    ProviderStyle,
    ProviderFormat,
    ProviderTileSize,
    ProviderTimeout,
    TileZoom,
    AnnotationMarkerRadius,
    AnnotationEndpointRadius,
    AnnotationLineWidth,
    AnnotationSegmentColor,
    AnnotationPoiColor,
    AnnotationReferenceColor,
    LoggingFile,
}

const ALL_KEYS: &[ConfigKey] = &[
    ConfigKey::ProviderApiKey,
    ConfigKey::ProviderBaseUrl,
    ConfigKey::ProviderStyle,
    ConfigKey::ProviderFormat,
    ConfigKey::ProviderTileSize,
    ConfigKey::ProviderTimeout,
    ConfigKey::TileZoom,
    ConfigKey::AnnotationMarkerRadius,
    ConfigKey::AnnotationEndpointRadius,
    ConfigKey::AnnotationLineWidth,
    ConfigKey::AnnotationSegmentColor,
    ConfigKey::AnnotationPoiColor,
    ConfigKey::AnnotationReferenceColor,
    ConfigKey::LoggingFile,
];

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        ALL_KEYS
    }

    /// INI section the key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            Self::ProviderApiKey
            | Self::ProviderBaseUrl
            | Self::ProviderStyle
            | Self::ProviderFormat
            | Self::ProviderTileSize
            | Self::ProviderTimeout => "provider",
            Self::TileZoom => "tile",
            Self::AnnotationMarkerRadius
            | Self::AnnotationEndpointRadius
            | Self::AnnotationLineWidth
            | Self::AnnotationSegmentColor
            | Self::AnnotationPoiColor
            | Self::AnnotationReferenceColor => "annotation",
            Self::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::ProviderApiKey => "api_key",
            Self::ProviderBaseUrl => "base_url",
            Self::ProviderStyle => "style",
            Self::ProviderFormat => "format",
            Self::ProviderTileSize => "tile_size",
            Self::ProviderTimeout => "timeout",
            Self::TileZoom => "zoom",
            Self::AnnotationMarkerRadius => "marker_radius",
            Self::AnnotationEndpointRadius => "endpoint_radius",
            Self::AnnotationLineWidth => "line_width",
            Self::AnnotationSegmentColor => "segment_color",
            Self::AnnotationPoiColor => "poi_color",
            Self::AnnotationReferenceColor => "reference_color",
            Self::LoggingFile => "file",
        }
    }

    /// Full dotted name, e.g. `tile.zoom`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when an optional key is unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        let annotation = &config.annotation;
        match self {
            Self::ProviderApiKey => config.provider.api_key.clone().unwrap_or_default(),
            Self::ProviderBaseUrl => config.provider.base_url.clone(),
            Self::ProviderStyle => config.provider.style.clone(),
            Self::ProviderFormat => config.provider.format.clone(),
            Self::ProviderTileSize => config.provider.tile_size.to_string(),
            Self::ProviderTimeout => config.provider.timeout_secs.to_string(),
            Self::TileZoom => config.zoom.to_string(),
            Self::AnnotationMarkerRadius => annotation.poi.radius.to_string(),
            Self::AnnotationEndpointRadius => annotation.segment.marker_radius.to_string(),
            Self::AnnotationLineWidth => annotation.segment.line_width.to_string(),
            Self::AnnotationSegmentColor => annotation.segment.color.to_string(),
            Self::AnnotationPoiColor => annotation.poi.color.to_string(),
            Self::AnnotationReferenceColor => annotation.reference.color.to_string(),
            Self::LoggingFile => config
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parses `value` and stores it in `config`.
    ///
    /// An empty value clears optional keys.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            Self::ProviderApiKey => {
                config.provider.api_key = non_empty(value).map(str::to_string);
            }
            Self::ProviderBaseUrl => config.provider.base_url = self.required(value)?.to_string(),
            Self::ProviderStyle => config.provider.style = self.required(value)?.to_string(),
            Self::ProviderFormat => config.provider.format = self.required(value)?.to_string(),
            Self::ProviderTileSize => {
                let size: u32 = self.parse(value)?;
                if !matches!(size, 256 | 512) {
                    return Err(self.invalid(value, "must be 256 or 512"));
                }
                config.provider.tile_size = size;
            }
            Self::ProviderTimeout => {
                let secs: u64 = self.parse(value)?;
                if secs == 0 {
                    return Err(self.invalid(value, "must be at least 1 second"));
                }
                config.provider.timeout_secs = secs;
            }
            Self::TileZoom => {
                let zoom: u8 = self.parse(value)?;
                if zoom > MAX_ZOOM {
                    return Err(self.invalid(value, &format!("must be at most {}", MAX_ZOOM)));
                }
                config.zoom = zoom;
            }
            Self::AnnotationMarkerRadius => {
                let radius = self.parse_length(value)?;
                config.annotation.poi.radius = radius;
                config.annotation.reference.radius = radius;
            }
            Self::AnnotationEndpointRadius => {
                config.annotation.segment.marker_radius = self.parse_length(value)?;
            }
            Self::AnnotationLineWidth => {
                config.annotation.segment.line_width = self.parse_length(value)?;
            }
            Self::AnnotationSegmentColor => {
                config.annotation.segment.color = self.parse_color(value)?;
            }
            Self::AnnotationPoiColor => config.annotation.poi.color = self.parse_color(value)?,
            Self::AnnotationReferenceColor => {
                config.annotation.reference.color = self.parse_color(value)?;
            }
            Self::LoggingFile => config.log_file = non_empty(value).map(PathBuf::from),
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn required<'v>(&self, value: &'v str) -> Result<&'v str, ConfigError> {
        non_empty(value).ok_or_else(|| self.invalid(value, "must not be empty"))
    }

    fn parse<T>(&self, value: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        value
            .parse()
            .map_err(|e: T::Err| self.invalid(value, &e.to_string()))
    }

    /// Positive, finite pixel length.
    fn parse_length(&self, value: &str) -> Result<f32, ConfigError> {
        let length: f32 = self.parse(value)?;
        if !length.is_finite() || length <= 0.0 {
            return Err(self.invalid(value, "must be a positive number of pixels"));
        }
        Ok(length)
    }

    fn parse_color(&self, value: &str) -> Result<Color, ConfigError> {
        self.parse(value)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
