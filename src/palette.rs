//! Palette building.
//!
//! Filters the color database down to one record per database key for the
//! selected series, then deduplicates by display name. The result is the
//! ordered set of colors a pattern may use.

use serde::Serialize;
use std::collections::HashMap;

use crate::color::Rgb;
use crate::database::{ColorDatabase, ColorRecord};
use crate::error::PatternError;
use crate::series::{select_series, MatchMode, SeriesSelection};

/// A usable color in a built palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "series")]
    pub series_title: String,
    pub hex: String,
    #[serde(rename = "color")]
    pub rgb: Rgb,
}

impl From<&ColorRecord> for PaletteEntry {
    fn from(record: &ColorRecord) -> Self {
        Self {
            display_name: record.display_name.clone(),
            series_title: record.series_title.clone(),
            hex: record.hex.clone(),
            rgb: record.rgb,
        }
    }
}

/// Ordered palette entries with unique display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    by_name: HashMap<String, usize>,
}

impl Palette {
    /// Build a palette from entries, keeping the first entry for each display name.
    pub fn from_entries(entries: impl IntoIterator<Item = PaletteEntry>) -> Self {
        let mut palette = Self::default();
        for entry in entries {
            palette.push_unique(entry);
        }
        palette
    }

    /// Append `entry` unless its display name is already present.
    fn push_unique(&mut self, entry: PaletteEntry) -> bool {
        if self.by_name.contains_key(&entry.display_name) {
            return false;
        }
        self.by_name.insert(entry.display_name.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by display name.
    pub fn by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.index_of(name).map(|i| &self.entries[i])
    }

    /// Palette position of a display name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Choose at most one record from a key's candidates.
///
/// An exact title match always wins; a substring match is only considered
/// in fuzzy mode.
fn select_record<'a>(
    candidates: &'a [ColorRecord],
    series: &str,
    mode: MatchMode,
) -> Option<&'a ColorRecord> {
    candidates
        .iter()
        .find(|r| r.series_title == series)
        .or_else(|| match mode {
            MatchMode::Strict => None,
            MatchMode::Fuzzy => candidates.iter().find(|r| r.series_title.contains(series)),
        })
}

/// Build the palette for an already made series decision.
///
/// # Errors
///
/// Returns `PatternError::EmptyPalette` if no record survives filtering.
pub fn build_palette_for(
    db: &ColorDatabase,
    selection: &SeriesSelection,
) -> Result<Palette, PatternError> {
    let mut palette = Palette::default();
    let mut duplicates = 0usize;

    for (key, candidates) in db.entries() {
        let Some(record) = select_record(candidates, &selection.series, selection.mode) else {
            continue;
        };
        if !palette.push_unique(PaletteEntry::from(record)) {
            duplicates += 1;
            tracing::debug!(
                key = %key,
                name = %record.display_name,
                "Dropping duplicate color name"
            );
        }
    }

    if palette.is_empty() {
        return Err(PatternError::EmptyPalette {
            series: selection.series.clone(),
            mode: selection.mode,
        });
    }

    tracing::info!(
        series = %selection.series,
        mode = %selection.mode,
        colors = palette.len(),
        duplicates,
        "Built palette"
    );
    Ok(palette)
}

/// Select a series and build its palette in one step.
///
/// Returns the palette together with the series decision, whose `mode`
/// reports whether strict matching was used.
///
/// # Errors
///
/// Returns `PatternError::EmptyDatabase` or `PatternError::EmptyPalette`.
pub fn build_palette(
    db: &ColorDatabase,
    requested_series: Option<&str>,
) -> Result<(Palette, SeriesSelection), PatternError> {
    let selection = select_series(db, requested_series)?;
    let palette = build_palette_for(db, &selection)?;
    Ok((palette, selection))
}
