//! End-to-end conversions.
//!
//! `convert_pattern` runs the palette-constrained path: series selection,
//! palette building, downsampling, matching and tallying. `convert_art`
//! runs the free path: downsampling then quantization. Both either return
//! a complete result or an error; nothing partial escapes.

use crate::database::ColorDatabase;
use crate::error::PatternError;
use crate::grid::{downsample, Grid, PixelGrid, PixelSource};
use crate::matcher::{match_grid_par, MatchedGrid};
use crate::palette::{build_palette, Palette};
use crate::quantize::quantize;
use crate::series::{AmbiguousSeries, SeriesSelection};
use crate::tally::{tally, BomEntry, UsageTally};

/// Options for a palette-constrained conversion.
#[derive(Debug, Clone, Default)]
pub struct PatternOptions {
    pub width: u32,
    /// Requested series; `None` picks the most populous one
    pub series: Option<String>,
}

/// A matched pattern with its usage counts.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub selection: SeriesSelection,
    pub palette: Palette,
    /// Downsampled source colors, before matching
    pub source: PixelGrid,
    pub matched: MatchedGrid,
    pub usage: UsageTally,
}

impl Pattern {
    pub fn width(&self) -> u32 {
        self.matched.width()
    }

    pub fn height(&self) -> u32 {
        self.matched.height()
    }

    /// Matched display names, row-major.
    pub fn names(&self) -> Grid<String> {
        crate::matcher::matched_names(&self.matched, &self.palette)
    }

    /// Matched colors, ready to render.
    pub fn colors(&self) -> PixelGrid {
        self.matched.map(|&i| self.palette.get(i).map(|e| e.rgb).unwrap_or_default())
    }

    pub fn bill_of_materials(&self) -> Vec<BomEntry> {
        self.usage.bill_of_materials(&self.palette)
    }

    /// Set when the series matched only by substring.
    pub fn warning(&self) -> Option<AmbiguousSeries> {
        self.selection.warning()
    }
}

/// Convert an image into a pattern restricted to one series' palette.
///
/// # Errors
///
/// Returns `PatternError` when no series can be chosen, the palette is
/// empty, or the target grid is degenerate.
pub fn convert_pattern<S: PixelSource + ?Sized>(
    image: &S,
    db: &ColorDatabase,
    options: &PatternOptions,
) -> Result<Pattern, PatternError> {
    let (palette, selection) = build_palette(db, options.series.as_deref())?;
    let source = downsample(image, options.width)?;
    let Some(matched) = match_grid_par(&source, &palette) else {
        return Err(PatternError::EmptyPalette {
            series: selection.series,
            mode: selection.mode,
        });
    };
    let usage = tally(&matched, &palette);

    tracing::info!(
        width = matched.width(),
        height = matched.height(),
        used = usage.used(),
        palette = palette.len(),
        "Matched pattern"
    );
    Ok(Pattern {
        selection,
        palette,
        source,
        matched,
        usage,
    })
}

/// Convert an image into free pixel art with at most `max_colors` colors.
///
/// # Errors
///
/// Returns `PatternError::InvalidDimensions` or
/// `PatternError::InvalidColorCount`.
pub fn convert_art<S: PixelSource + ?Sized>(
    image: &S,
    width: u32,
    max_colors: usize,
) -> Result<PixelGrid, PatternError> {
    if max_colors == 0 {
        return Err(PatternError::InvalidColorCount);
    }
    let grid = downsample(image, width)?;
    quantize(&grid, max_colors)
}
