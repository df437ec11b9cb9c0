//! Configuration file support.
//!
//! Settings live in an INI file at `~/.config/poitile/config.ini` (or the
//! platform equivalent). Every key is optional; missing keys take the
//! library defaults.
//!
//! ```ini
//! [provider]
//! api_key = ...
//! base_url = https://maps.hereapi.com/v3/base/mc
//! style = satellite.day
//! format = png
//! tile_size = 512
//! timeout = 30
//!
//! [tile]
//! zoom = 16
//!
//! [annotation]
//! marker_radius = 8
//! endpoint_radius = 5
//! line_width = 3
//! segment_color = yellow
//! poi_color = red
//! reference_color = white
//!
//! [logging]
//! file = /var/log/poitile.log
//! ```
//!
//! The `POITILE_API_KEY` environment variable takes precedence over
//! `provider.api_key`.

mod keys;

pub use keys::ConfigKey;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::annotate::AnnotationConfig;
use crate::provider::ProviderConfig;

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "POITILE_API_KEY";

/// Default zoom level for tile lookups.
pub const DEFAULT_ZOOM: u8 = 16;

/// Errors from loading, parsing or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading or writing the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A key holds a value of the wrong shape.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Key name not recognized.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The platform has no config directory.
    #[error("Could not determine the user config directory")]
    NoConfigDir,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tile fetch settings.
    pub provider: ProviderConfig,
    /// Zoom level used when none is given on the command line.
    pub zoom: u8,
    /// Marker and segment styles.
    pub annotation: AnnotationConfig,
    /// Optional log file; logs go to stderr only when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            zoom: DEFAULT_ZOOM,
            annotation: AnnotationConfig::default(),
            log_file: None,
        }
    }
}

/// Directory holding the poitile config file.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("poitile"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Path of the default config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.ini"))
}

impl ConfigFile {
    /// Loads the default config file, applying the API key environment
    /// override. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path()?;
        let config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Loads and parses a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Parses INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()))
            {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Replaces the API key when `api_key` is a non-empty value.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }
        self
    }

    /// Renders the configuration as INI text. Unset optional keys are omitted.
    pub fn to_ini(&self) -> String {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }

        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = ini.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ini())?;
        Ok(())
    }

    /// Writes the configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(config_file_path()?)
    }

    /// Tile fetch settings.
    pub fn provider_config(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Marker and segment styles.
    pub fn annotation_config(&self) -> &AnnotationConfig {
        &self.annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Color;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.zoom, 16);
        assert_eq!(config.provider.tile_size, 512);
    }

    #[test]
    fn test_parse_full_file() {
        let text = "\
[provider]
api_key = secret
style = satellite.night
format = jpeg
tile_size = 256
timeout = 10

[tile]
zoom = 18

[annotation]
marker_radius = 10
endpoint_radius = 4
line_width = 2.5
segment_color = #00ff00
poi_color = purple
reference_color = black

[logging]
file = /tmp/poitile.log
";
        let config = ConfigFile::parse(text).unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider.style, "satellite.night");
        assert_eq!(config.provider.format, "jpeg");
        assert_eq!(config.provider.tile_size, 256);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.zoom, 18);
        assert_eq!(config.annotation.poi.radius, 10.0);
        assert_eq!(config.annotation.reference.radius, 10.0);
        assert_eq!(config.annotation.segment.marker_radius, 4.0);
        assert_eq!(config.annotation.segment.line_width, 2.5);
        assert_eq!(config.annotation.segment.color, Color::rgb(0, 255, 0));
        assert_eq!(config.annotation.poi.color, Color::PURPLE);
        assert_eq!(config.annotation.reference.color, Color::BLACK);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/poitile.log")));
    }

    #[test]
    fn test_invalid_zoom_is_rejected() {
        let err = ConfigFile::parse("[tile]\nzoom = 25\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("tile.zoom"));
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let err = ConfigFile::parse("[annotation]\npoi_color = chartreuse-ish\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = ConfigFile::parse("[provider]\nflavour = vanilla\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_api_key_override() {
        let config = ConfigFile::parse("[provider]\napi_key = from-file\n").unwrap();

        let overridden = config.clone().with_api_key_override(Some("from-env".to_string()));
        assert_eq!(overridden.provider.api_key.as_deref(), Some("from-env"));

        let blank = config.clone().with_api_key_override(Some("  ".to_string()));
        assert_eq!(blank.provider.api_key.as_deref(), Some("from-file"));

        let none = config.with_api_key_override(None);
        assert_eq!(none.provider.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.provider.api_key = Some("abc".to_string());
        config.zoom = 17;
        config.annotation.segment.color = Color::rgba(1, 2, 3, 128);
        config.save_to(&path).unwrap();

        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_to_ini_omits_unset_keys() {
        let text = ConfigFile::default().to_ini();
        assert!(!text.contains("api_key"));
        assert!(!text.contains("[logging]"));
        assert!(text.contains("zoom=16") || text.contains("zoom = 16"));
    }
}
