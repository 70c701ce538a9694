//! Series selection.
//!
//! Decides which series (product line) a pattern is built from and whether
//! records must match that series exactly (strict) or may merely contain it
//! (fuzzy). The decision is a plain value computed from the database, so it
//! can be inspected and tested on its own.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::database::ColorDatabase;
use crate::error::PatternError;

/// How record titles are compared against the target series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Only titles equal to the series are accepted
    Strict,
    /// Titles equal to the series win; titles containing it are a fallback
    Fuzzy,
}

impl MatchMode {
    pub fn is_strict(self) -> bool {
        self == MatchMode::Strict
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Strict => write!(f, "strict"),
            MatchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Number of records listed under one series title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesCount {
    pub title: String,
    pub count: usize,
}

/// Non-fatal notice that a series name only partially matched the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousSeries {
    pub series: String,
}

impl fmt::Display for AmbiguousSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "series '{}' is not an exact series title; matching any title that contains it",
            self.series
        )
    }
}

/// The outcome of series selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSelection {
    /// Series the palette is built from
    pub series: String,
    pub mode: MatchMode,
    /// Set when the series was picked automatically (most populous)
    pub auto_selected: Option<usize>,
}

impl SeriesSelection {
    pub fn is_strict(&self) -> bool {
        self.mode.is_strict()
    }

    /// The fuzzy-mode notice callers should surface to users, if any.
    pub fn warning(&self) -> Option<AmbiguousSeries> {
        match self.mode {
            MatchMode::Strict => None,
            MatchMode::Fuzzy => Some(AmbiguousSeries {
                series: self.series.clone(),
            }),
        }
    }
}

/// Count records per non-empty series title.
///
/// Sorted by descending count; equal counts keep first-appearance order.
pub fn list_series(db: &ColorDatabase) -> Vec<SeriesCount> {
    let mut counts: Vec<SeriesCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in db.records() {
        let title = record.series_title.as_str();
        if title.is_empty() {
            continue;
        }
        match positions.get(title) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(title, counts.len());
                counts.push(SeriesCount {
                    title: title.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Pick the target series and matching mode.
///
/// With no request (or an empty one) the most populous series is used.
/// The mode is strict when the name equals some title in the database.
///
/// # Errors
///
/// Returns `PatternError::EmptyDatabase` when no series is requested and no
/// record carries a title to choose from.
pub fn select_series(
    db: &ColorDatabase,
    requested: Option<&str>,
) -> Result<SeriesSelection, PatternError> {
    let (series, auto_selected) = match requested.filter(|name| !name.is_empty()) {
        Some(name) => (name.to_string(), None),
        None => {
            let top = list_series(db)
                .into_iter()
                .next()
                .ok_or(PatternError::EmptyDatabase)?;
            tracing::info!(
                series = %top.title,
                records = top.count,
                "Auto-selected most populous series"
            );
            (top.title, Some(top.count))
        }
    };

    let mode = if db.has_series(&series) {
        MatchMode::Strict
    } else {
        MatchMode::Fuzzy
    };
    match mode {
        MatchMode::Strict => {
            tracing::info!(series = %series, "Exact series title found, using strict matching")
        }
        MatchMode::Fuzzy => {
            tracing::warn!(series = %series, "Series title not found exactly, using fuzzy matching")
        }
    }

    Ok(SeriesSelection {
        series,
        mode,
        auto_selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ColorRecord;

    fn db(records: &[(&str, &str, &str)]) -> ColorDatabase {
        ColorDatabase::from_records(
            records
                .iter()
                .map(|(hex, name, title)| ColorRecord::new(hex, *name, *title).unwrap()),
        )
    }

    #[test]
    fn test_list_series_sorted_by_count() {
        let db = db(&[
            ("ff0000", "R1", "A"),
            ("00ff00", "G1", "B"),
            ("0000ff", "B1", "B"),
            ("ffffff", "W1", ""),
        ]);

        let listed = list_series(&db);
        assert_eq!(
            listed,
            vec![
                SeriesCount {
                    title: "B".to_string(),
                    count: 2,
                },
                SeriesCount {
                    title: "A".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_auto_select_picks_most_populous() {
        let db = db(&[
            ("ff0000", "R1", "A"),
            ("00ff00", "G1", "B"),
            ("0000ff", "B1", "B"),
        ]);

        let selection = select_series(&db, None).unwrap();
        assert_eq!(selection.series, "B");
        assert_eq!(selection.mode, MatchMode::Strict);
        assert_eq!(selection.auto_selected, Some(2));
    }

    #[test]
    fn test_auto_select_tie_goes_to_first_encountered() {
        let db = db(&[
            ("ff0000", "R1", "Second"),
            ("ff0000", "R2", "First"),
            ("00ff00", "G1", "First"),
            ("00ff00", "G2", "Second"),
        ]);

        let selection = select_series(&db, None).unwrap();
        assert_eq!(selection.series, "Second");
    }

    #[test]
    fn test_auto_select_fails_without_titles() {
        let db = db(&[("ff0000", "R1", ""), ("00ff00", "G1", "")]);
        assert_eq!(select_series(&db, None), Err(PatternError::EmptyDatabase));
        assert_eq!(
            select_series(&ColorDatabase::default(), None),
            Err(PatternError::EmptyDatabase)
        );
    }

    #[test]
    fn test_empty_request_means_auto() {
        let db = db(&[("ff0000", "R1", "A")]);
        let selection = select_series(&db, Some("")).unwrap();
        assert_eq!(selection.series, "A");
        assert!(selection.auto_selected.is_some());
    }

    #[test]
    fn test_exact_request_is_strict() {
        let db = db(&[
            ("ff0000", "R1", "Mard-221"),
            ("00ff00", "G1", "Brand Mard-221"),
        ]);

        let selection = select_series(&db, Some("Mard-221")).unwrap();
        assert!(selection.is_strict());
        assert_eq!(selection.auto_selected, None);
        assert_eq!(selection.warning(), None);
    }

    #[test]
    fn test_partial_request_is_fuzzy_with_warning() {
        let db = db(&[("ff0000", "R1", "XYZ-100")]);

        let selection = select_series(&db, Some("XYZ")).unwrap();
        assert_eq!(selection.mode, MatchMode::Fuzzy);
        let warning = selection.warning().unwrap();
        assert_eq!(warning.series, "XYZ");
        assert!(warning.to_string().contains("'XYZ'"));
    }

    #[test]
    fn test_unknown_request_is_fuzzy_not_error() {
        let db = db(&[("ff0000", "R1", "A")]);
        let selection = select_series(&db, Some("Nope")).unwrap();
        assert_eq!(selection.mode, MatchMode::Fuzzy);
    }
}
