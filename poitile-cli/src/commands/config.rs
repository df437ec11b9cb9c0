//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use clap::Subcommand;
use poitile::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., tile.zoom)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., annotation.poi_color)
        key: String,

        /// Value to set (empty clears optional keys)
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'poitile config list' to see available keys.",
            key
        ))
    })
}

/// Reads the file as written, without the API key environment override.
fn load_file() -> Result<ConfigFile, CliError> {
    let path = config_file_path()?;
    if path.exists() {
        Ok(ConfigFile::load_from(&path)?)
    } else {
        Ok(ConfigFile::default())
    }
}

const NOT_SET: &str = "(not set)";

/// Value as shown to the user. The API key is only revealed when asked
/// for by name.
fn shown_value(key: ConfigKey, config: &ConfigFile, reveal_secret: bool) -> String {
    let value = key.get(config);
    match (value.is_empty(), key) {
        (true, _) => NOT_SET.to_string(),
        (false, ConfigKey::ProviderApiKey) if !reveal_secret => "(set)".to_string(),
        (false, _) => value,
    }
}

/// Renders every key grouped under its `[section]` header, one blank line
/// between sections.
fn render_settings(config: &ConfigFile) -> String {
    let mut sections: Vec<(&str, Vec<String>)> = Vec::new();
    for &key in ConfigKey::all() {
        let line = format!("  {} = {}", key.key_name(), shown_value(key, config, false));
        match sections.last_mut() {
            Some((section, lines)) if *section == key.section() => lines.push(line),
            _ => sections.push((key.section(), vec![line])),
        }
    }

    sections
        .iter()
        .map(|(section, lines)| format!("[{}]\n{}\n", section, lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn run_get(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    println!("{}", shown_value(key, &load_file()?, true));
    Ok(())
}

/// Validates and stores one value, leaving the rest of the file intact.
fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut config = load_file()?;
    key.set(&mut config, value)?;
    config.save()?;

    tracing::info!(key = %key, "Configuration updated");
    println!("{} = {}", key, shown_value(key, &config, false));
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    print!("{}", render_settings(&load_file()?));
    Ok(())
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_hidden_unless_requested() {
        let mut config = ConfigFile::default();
        assert_eq!(shown_value(ConfigKey::ProviderApiKey, &config, false), NOT_SET);

        ConfigKey::ProviderApiKey.set(&mut config, "k-123").unwrap();
        assert_eq!(shown_value(ConfigKey::ProviderApiKey, &config, false), "(set)");
        assert_eq!(shown_value(ConfigKey::ProviderApiKey, &config, true), "k-123");
    }

    #[test]
    fn test_render_settings_groups_by_section() {
        let mut config = ConfigFile::default();
        ConfigKey::ProviderApiKey.set(&mut config, "k-123").unwrap();

        let rendered = render_settings(&config);

        assert!(rendered.starts_with("[provider]\n"));
        assert!(rendered.contains("  api_key = (set)\n"));
        assert!(!rendered.contains("k-123"));
        assert!(rendered.contains("\n\n[tile]\n  zoom = 16\n"));
        assert!(rendered.contains("  file = (not set)"));
        for key in ConfigKey::all() {
            assert_eq!(rendered.matches(&format!("[{}]", key.section())).count(), 1);
        }
    }
}
