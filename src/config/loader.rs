//! Configuration loading and discovery for `beadgrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::BeadConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "beadgrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse beadgrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", bullet_list(.0))]
    Validation(Vec<String>),
}

fn bullet_list(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Pattern grid width
    pub pattern_width: Option<u32>,
    /// Series name
    pub series: Option<String>,
    /// Art grid width
    pub art_width: Option<u32>,
    /// Art color count
    pub colors: Option<usize>,
    /// Preview scale factor
    pub scale: Option<u32>,
    /// Draw preview grid lines
    pub grid: Option<bool>,
}

/// Find beadgrid.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for beadgrid.toml
/// 2. Check XDG_CONFIG_HOME/beadgrid/beadgrid.toml (or ~/.config/beadgrid/beadgrid.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find beadgrid.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("beadgrid").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find beadgrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a beadgrid.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("crafts/beadgrid.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<BeadConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative `pattern.database` is resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<BeadConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: BeadConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(
            errors.into_iter().map(|e| e.to_string()).collect(),
        ));
    }

    if let Some(database) = config.pattern.database.take() {
        config.pattern.database = Some(match config_root(path) {
            Some(root) => resolve_path(root, &database),
            None => database,
        });
    }

    tracing::info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Configuration used when no beadgrid.toml is found.
pub fn default_config() -> BeadConfig {
    BeadConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut BeadConfig, overrides: &CliOverrides) {
    if let Some(width) = overrides.pattern_width {
        config.pattern.width = width;
    }
    if let Some(ref series) = overrides.series {
        config.pattern.series = Some(series.clone());
    }
    if let Some(width) = overrides.art_width {
        config.art.width = width;
    }
    if let Some(colors) = overrides.colors {
        config.art.colors = colors;
    }
    if let Some(scale) = overrides.scale {
        config.preview.scale = scale;
    }
    if let Some(grid) = overrides.grid {
        config.preview.grid = grid;
    }
}

/// Directory holding a config file.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
