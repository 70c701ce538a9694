//! Configuration module for beadgrid
//!
//! Provides types, discovery and parsing for `beadgrid.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
