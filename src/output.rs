//! Pattern documents, PNG previews and output path generation

use image::imageops::FilterType;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::Rgb;
use crate::grid::PixelGrid;
use crate::palette::PaletteEntry;
use crate::pipeline::Pattern;
use crate::series::MatchMode;
use crate::tally::BomEntry;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Pattern document serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The JSON document written for a matched pattern.
#[derive(Debug, Serialize)]
pub struct PatternDocument<'a> {
    pub series: &'a str,
    pub mode: MatchMode,
    pub width: u32,
    pub height: u32,
    /// Display names, one row per grid row
    pub grid: Vec<Vec<&'a str>>,
    pub palette: &'a [PaletteEntry],
    pub bill_of_materials: Vec<BomEntry>,
}

impl<'a> PatternDocument<'a> {
    pub fn new(pattern: &'a Pattern) -> Self {
        let name = |i: &usize| {
            pattern
                .palette
                .get(*i)
                .map(|e| e.display_name.as_str())
                .unwrap_or("")
        };
        Self {
            series: &pattern.selection.series,
            mode: pattern.selection.mode,
            width: pattern.width(),
            height: pattern.height(),
            grid: pattern
                .matched
                .rows()
                .map(|row| row.iter().map(name).collect())
                .collect(),
            palette: pattern.palette.entries(),
            bill_of_materials: pattern.bill_of_materials(),
        }
    }
}

/// Preview rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewStyle {
    /// Pixels per cell
    pub scale: u32,
    /// Cell border color, `None` for no borders
    pub grid_color: Option<Rgb>,
}

/// Smallest scale at which cell borders are drawn
pub const MIN_GRID_SCALE: u32 = 3;

/// Decode an image file into RGB pixels.
pub fn load_image(path: &Path) -> Result<RgbImage, OutputError> {
    let image = image::open(path)?.to_rgb8();
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Create parent directories of `path` if they don't exist.
fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGB image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    image.save(path)?;
    Ok(())
}

/// Write the pattern document as pretty-printed JSON.
pub fn write_pattern_json(pattern: &Pattern, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(&PatternDocument::new(pattern))?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Wrote pattern document");
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
pub fn scale_image(image: RgbImage, factor: u32) -> RgbImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Render a color grid as a PNG-ready image.
///
/// Each cell becomes a `scale`x`scale` block. Borders are 1 pixel wide on
/// the top and left of every cell and only drawn from `MIN_GRID_SCALE` up.
pub fn render_preview(grid: &PixelGrid, style: PreviewStyle) -> RgbImage {
    let mut image = scale_image(RgbImage::from(grid), style.scale);

    if let Some(color) = style.grid_color.filter(|_| style.scale >= MIN_GRID_SCALE) {
        let line = image::Rgb::from(color);
        let scale = style.scale;
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            if x % scale == 0 || y % scale == 0 {
                *pixel = line;
            }
        }
    }
    image
}

/// Generate an output path next to the input.
///
/// With `-o`, the given path is used as is, or `dir/{stem}{suffix}.{ext}`
/// when it names a directory. Otherwise `{input_stem}{suffix}.{ext}` beside
/// the input file.
pub fn generate_output_path(
    input: &Path,
    suffix: &str,
    extension: &str,
    output_arg: Option<&Path>,
) -> PathBuf {
    let input_stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = format!("{}{}.{}", input_stem, suffix, extension);

    match output_arg {
        Some(output) => {
            let is_dir =
                output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        },
    }
}
