//! beadgrid - Palette-constrained pixel quantization
//!
//! This library provides functionality to:
//! - Load color databases mapping hex colors to product listings
//! - Select a series and build a deduplicated palette from it
//! - Downsample images to a cell grid and match every cell to the palette
//! - Tally color usage into a bill of materials
//! - Quantize images to free pixel art with a limited color count

pub mod cli;
pub mod color;
pub mod config;
pub mod database;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod quantize;
pub mod series;
pub mod tally;

pub use error::PatternError;
