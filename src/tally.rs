//! Usage accounting for the bill of materials.

use serde::Serialize;

use crate::color::Rgb;
use crate::matcher::MatchedGrid;
use crate::palette::Palette;

/// Per-entry occurrence counts, indexed like the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageTally {
    counts: Vec<usize>,
}

/// One reported line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomEntry {
    pub name: String,
    pub series: String,
    pub hex: String,
    pub count: usize,
    /// Readable label color on top of this entry's swatch
    pub text_color: Rgb,
}

impl UsageTally {
    /// A zero count for every palette entry.
    pub fn new(palette: &Palette) -> Self {
        Self {
            counts: vec![0; palette.len()],
        }
    }

    /// Count one cell matched to palette index `index`.
    pub fn record(&mut self, index: usize) {
        if let Some(count) = self.counts.get_mut(index) {
            *count += 1;
        }
    }

    pub fn count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Count for a display name, `None` if it is not in the palette.
    pub fn count_of(&self, palette: &Palette, name: &str) -> Option<usize> {
        palette.index_of(name).map(|i| self.count(i))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of palette entries used at least once.
    pub fn used(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// Used entries as `(palette index, count)`, most used first.
    ///
    /// Equal counts keep palette order; unused entries are left out.
    pub fn sorted(&self) -> Vec<(usize, usize)> {
        let mut used: Vec<(usize, usize)> = self
            .counts
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, n)| n > 0)
            .collect();
        used.sort_by(|a, b| b.1.cmp(&a.1));
        used
    }

    /// The sorted view resolved against the palette.
    pub fn bill_of_materials(&self, palette: &Palette) -> Vec<BomEntry> {
        self.sorted()
            .into_iter()
            .filter_map(|(i, count)| {
                let entry = palette.get(i)?;
                Some(BomEntry {
                    name: entry.display_name.clone(),
                    series: entry.series_title.clone(),
                    hex: entry.hex.clone(),
                    count,
                    text_color: entry.rgb.contrast_text(),
                })
            })
            .collect()
    }
}

/// Tally the matched grid against its palette.
pub fn tally(matched: &MatchedGrid, palette: &Palette) -> UsageTally {
    let mut usage = UsageTally::new(palette);
    for &index in matched.cells() {
        usage.record(index);
    }
    usage
}
