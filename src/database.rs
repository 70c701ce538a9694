//! Color database loading.
//!
//! A color database is a JSON object mapping hex color keys to the list of
//! products that claim that color:
//!
//! ```json
//! {
//!   "ff0000": [
//!     {"colorName": "A01", "colorTitle": "Mard-221"},
//!     {"colorName": "R12", "colorTitle": "Hama Midi"}
//!   ],
//!   "00ff00": [{"colorName": "G07", "colorTitle": "Mard-221"}]
//! }
//! ```
//!
//! Key order is significant: palettes are built in database order and the
//! matcher breaks distance ties by palette order. Keys are taken as written,
//! so `#ff0000` and `ff0000` are two entries of the same color.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::color::Rgb;

/// Name used when a record has no `colorName`
pub const UNKNOWN_NAME: &str = "???";

/// Error loading a color database
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatabaseError {
    /// File I/O error
    #[error("Failed to read color database: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON
    #[error("Failed to parse color database: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON that is not an object of record lists
    #[error("Invalid color database: {0}")]
    InvalidShape(String),
}

/// One product listing for a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRecord {
    /// Database key, without a leading `#`
    pub hex: String,
    pub rgb: Rgb,
    /// Series (product line) this listing belongs to; may be empty
    pub series_title: String,
    /// Color code printed on the pattern and the bill of materials
    pub display_name: String,
}

/// Record as it appears in the JSON document.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "colorName", default)]
    color_name: Option<String>,
    #[serde(rename = "colorTitle", default)]
    color_title: Option<String>,
}

/// Database key to candidate records, in document order.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ColorDatabase {
    entries: Vec<(String, Vec<ColorRecord>)>,
    index: HashMap<String, usize>,
    skipped_keys: Vec<String>,
}

impl ColorDatabase {
    /// Build a database from records, grouping them by `hex` in first-seen order.
    pub fn from_records(records: impl IntoIterator<Item = ColorRecord>) -> Self {
        let mut db = Self::default();
        for record in records {
            let slot = match db.index.get(&record.hex) {
                Some(&i) => i,
                None => {
                    db.index.insert(record.hex.clone(), db.entries.len());
                    db.entries.push((record.hex.clone(), Vec::new()));
                    db.entries.len() - 1
                }
            };
            db.entries[slot].1.push(record);
        }
        db
    }

    /// Parse a database from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DatabaseError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(document)
    }

    /// Parse a database from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatabaseError> {
        let document: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(document)
    }

    /// Load a database from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatabaseError> {
        let contents = fs::read_to_string(path)?;
        let db = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            colors = db.len(),
            records = db.record_count(),
            "Loaded color database"
        );
        Ok(db)
    }

    fn from_json_value(document: serde_json::Value) -> Result<Self, DatabaseError> {
        let serde_json::Value::Object(map) = document else {
            return Err(DatabaseError::InvalidShape(
                "top-level value must be an object keyed by hex color".to_string(),
            ));
        };

        let mut db = Self::default();
        for (key, value) in map {
            let raw: Vec<RawRecord> = serde_json::from_value(value).map_err(|e| {
                DatabaseError::InvalidShape(format!(
                    "entry '{}' must be a list of records: {}",
                    key, e
                ))
            })?;

            let hex = key.strip_prefix('#').unwrap_or(&key).to_string();
            let rgb = match Rgb::from_hex(&hex) {
                Ok(rgb) => rgb,
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "Skipping color database key that is not a hex color"
                    );
                    db.skipped_keys.push(key);
                    continue;
                }
            };

            let records: Vec<ColorRecord> = raw
                .into_iter()
                .map(|r| ColorRecord {
                    hex: hex.clone(),
                    rgb,
                    series_title: r.color_title.unwrap_or_default(),
                    display_name: r.color_name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                })
                .collect();

            // JSON object keys are unique, so every key gets its own slot
            db.index.insert(key.clone(), db.entries.len());
            db.entries.push((key, records));
        }

        Ok(db)
    }

    /// Iterate keys with their candidate records, in database order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[ColorRecord])> {
        self.entries
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Iterate every record across all keys, in database order.
    pub fn records(&self) -> impl Iterator<Item = &ColorRecord> {
        self.entries.iter().flat_map(|(_, records)| records.iter())
    }

    /// Candidate records for a key, spelled as in the document.
    pub fn get(&self, key: &str) -> Option<&[ColorRecord]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    /// Whether some record's series title equals `title` exactly.
    pub fn has_series(&self, title: &str) -> bool {
        self.records().any(|r| r.series_title == title)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of records across all keys.
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }

    /// Keys dropped during loading because they were not hex colors.
    pub fn skipped_keys(&self) -> &[String] {
        &self.skipped_keys
    }
}

impl ColorRecord {
    /// Create a record, parsing `hex` (with or without `#`).
    pub fn new(
        hex: &str,
        display_name: impl Into<String>,
        series_title: impl Into<String>,
    ) -> Result<Self, crate::color::ColorError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        Ok(Self {
            hex: hex.to_string(),
            rgb: Rgb::from_hex(hex)?,
            series_title: series_title.into(),
            display_name: display_name.into(),
        })
    }
}
