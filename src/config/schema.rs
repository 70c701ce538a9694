//! Configuration schema types for `beadgrid.toml`
//!
//! Defines the structure and validation rules for beadgrid defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::Rgb;

/// Smallest and largest color count accepted for art mode
pub const MIN_ART_COLORS: usize = 2;
pub const MAX_ART_COLORS: usize = 256;

/// Largest preview scale factor
pub const MAX_PREVIEW_SCALE: u32 = 64;

/// Root configuration structure for `beadgrid.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeadConfig {
    /// Palette-constrained pattern defaults
    #[serde(default)]
    pub pattern: PatternConfig,
    /// Free quantization defaults
    #[serde(default)]
    pub art: ArtConfig,
    /// PNG preview rendering
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// `[pattern]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Grid width in cells
    #[serde(default = "default_pattern_width")]
    pub width: u32,
    /// Series to build the palette from (most populous if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// Default color database, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            width: default_pattern_width(),
            series: None,
            database: None,
        }
    }
}

fn default_pattern_width() -> u32 {
    50
}

/// `[art]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtConfig {
    #[serde(default = "default_art_width")]
    pub width: u32,
    /// Maximum number of colors after quantization
    #[serde(default = "default_art_colors")]
    pub colors: usize,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            width: default_art_width(),
            colors: default_art_colors(),
        }
    }
}

fn default_art_width() -> u32 {
    150
}

fn default_art_colors() -> usize {
    48
}

/// `[preview]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Pixels per cell
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Draw cell borders
    #[serde(default = "default_grid")]
    pub grid: bool,
    /// Border color as a hex string
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            grid: default_grid(),
            grid_color: default_grid_color(),
        }
    }
}

impl PreviewConfig {
    /// Parsed grid line color, falling back to the default on bad input.
    pub fn grid_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.grid_color).unwrap_or(Rgb::new(0xE0, 0xE0, 0xE0))
    }
}

fn default_scale() -> u32 {
    8
}

fn default_grid() -> bool {
    true
}

fn default_grid_color() -> String {
    "#E0E0E0".to_string()
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Dotted path to the invalid field (e.g., "art.colors")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "beadgrid.toml: '{}' {}", self.field, self.message)
    }
}

impl BeadConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: String| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message,
            })
        };

        if self.pattern.width == 0 {
            fail("pattern.width", "must be a positive integer".to_string());
        }
        if self.art.width == 0 {
            fail("art.width", "must be a positive integer".to_string());
        }
        if !(MIN_ART_COLORS..=MAX_ART_COLORS).contains(&self.art.colors) {
            fail(
                "art.colors",
                format!("must be between {} and {}", MIN_ART_COLORS, MAX_ART_COLORS),
            );
        }
        if !(1..=MAX_PREVIEW_SCALE).contains(&self.preview.scale) {
            fail(
                "preview.scale",
                format!("must be between 1 and {}", MAX_PREVIEW_SCALE),
            );
        }
        if let Err(e) = Rgb::from_hex(&self.preview.grid_color) {
            fail("preview.grid_color", format!("is not a hex color ({})", e));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BeadConfig::default();
        assert_eq!(config.pattern.width, 50);
        assert_eq!(config.pattern.series, None);
        assert_eq!(config.art.width, 150);
        assert_eq!(config.art.colors, 48);
        assert_eq!(config.preview.scale, 8);
        assert!(config.preview.grid);
        assert_eq!(config.preview.grid_rgb(), Rgb::new(0xE0, 0xE0, 0xE0));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: BeadConfig = toml::from_str("[art]\ncolors = 16\n").unwrap();
        assert_eq!(config.art.colors, 16);
        assert_eq!(config.art.width, 150);
        assert_eq!(config.pattern, PatternConfig::default());
    }

    #[test]
    fn test_validate_reports_every_field() {
        let mut config = BeadConfig::default();
        config.pattern.width = 0;
        config.art.colors = 1;
        config.preview.scale = 65;
        config.preview.grid_color = "grey".to_string();

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["pattern.width", "art.colors", "preview.scale", "preview.grid_color"]
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "art.colors".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "beadgrid.toml: 'art.colors' bad");
    }
}
