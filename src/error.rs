//! Errors raised by the pattern pipeline.

use thiserror::Error;

use crate::series::MatchMode;

/// Fatal pipeline errors.
///
/// Every failure stems from invalid input data, so none of these are retried
/// and no partial pattern is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// No record in the database carries a series title
    #[error("color database has no series information (no record has a non-empty colorTitle)")]
    EmptyDatabase,
    /// The chosen series and mode selected zero colors
    #[error("no colors found for series '{series}' ({mode} mode){}", hint(.mode))]
    EmptyPalette { series: String, mode: MatchMode },
    /// The requested grid would have no cells, or more rows than fit a `u32`
    #[error("invalid grid dimensions: {width}x{height} from source {source_width}x{source_height}")]
    InvalidDimensions {
        source_width: u32,
        source_height: u32,
        width: u32,
        /// Height derived from the aspect ratio, before narrowing
        height: u64,
    },
    /// Free quantization was asked for zero colors
    #[error("color count must be at least 1")]
    InvalidColorCount,
}

fn hint(mode: &MatchMode) -> &'static str {
    match mode {
        MatchMode::Strict => {
            "; strict mode only accepts records whose colorTitle equals the series exactly"
        }
        MatchMode::Fuzzy => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_message_names_series_and_mode() {
        let err = PatternError::EmptyPalette {
            series: "Mard-221".to_string(),
            mode: MatchMode::Strict,
        };
        let msg = err.to_string();
        assert!(msg.contains("'Mard-221'"));
        assert!(msg.contains("strict mode"));
        assert!(msg.contains("exactly"));

        let err = PatternError::EmptyPalette {
            series: "Mard".to_string(),
            mode: MatchMode::Fuzzy,
        };
        assert_eq!(err.to_string(), "no colors found for series 'Mard' (fuzzy mode)");
    }

    #[test]
    fn test_invalid_dimensions_message() {
        let err = PatternError::InvalidDimensions {
            source_width: 400,
            source_height: 1,
            width: 50,
            height: 0,
        };
        assert_eq!(err.to_string(), "invalid grid dimensions: 50x0 from source 400x1");
    }
}
