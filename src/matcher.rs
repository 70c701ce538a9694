//! Nearest-color matching against a palette.
//!
//! Every cell is compared with every palette entry by squared RGB
//! distance. The lowest palette index wins ties, in both the sequential
//! and the parallel matcher.

use rayon::prelude::*;

use crate::color::Rgb;
use crate::grid::{Grid, PixelGrid};
use crate::palette::Palette;

/// A grid of palette indices.
pub type MatchedGrid = Grid<usize>;

/// Index of the palette entry closest to `color`.
///
/// Returns `None` only for an empty palette.
pub fn nearest(color: Rgb, palette: &Palette) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, entry) in palette.iter().enumerate() {
        let d = color.distance_sq(entry.rgb);
        match best {
            // Strict `<` keeps the earliest entry on equal distance
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
        if d == 0 {
            break;
        }
    }
    best.map(|(i, _)| i)
}

/// Match every cell of `grid` to its nearest palette entry.
///
/// Returns `None` for an empty palette, even when the grid is empty.
pub fn match_grid(grid: &PixelGrid, palette: &Palette) -> Option<MatchedGrid> {
    if palette.is_empty() {
        return None;
    }
    let cells: Vec<usize> = grid
        .cells()
        .iter()
        .map(|&color| nearest(color, palette))
        .collect::<Option<_>>()?;
    Grid::from_cells(grid.width(), grid.height(), cells)
}

/// Parallel `match_grid`: rows are matched on the rayon pool and
/// reassembled in order, so the result is identical to the sequential one.
pub fn match_grid_par(grid: &PixelGrid, palette: &Palette) -> Option<MatchedGrid> {
    if palette.is_empty() {
        return None;
    }
    let width = grid.width().max(1) as usize;
    let cells: Vec<usize> = grid
        .cells()
        .par_chunks(width)
        .flat_map_iter(|row| row.iter().map(|&color| nearest(color, palette)))
        .collect::<Option<_>>()?;
    Grid::from_cells(grid.width(), grid.height(), cells)
}

/// Display names of the matched entries, row-major.
pub fn matched_names(matched: &MatchedGrid, palette: &Palette) -> Grid<String> {
    matched.map(|&i| {
        palette
            .get(i)
            .map(|e| e.display_name.clone())
            .unwrap_or_default()
    })
}
