//! RGB color value and hex parsing utilities
//!
//! Color database keys and config colors are 6-digit hex strings, with or
//! without a leading `#` (e.g. `ff0000`, `#FF0000`).

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 6 hex chars, optionally after '#')
    #[error("invalid color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (`RRGGBB` or `#RRGGBB`, case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use beadgrid::color::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("ff8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert_eq!(Rgb::from_hex("#00FF00").unwrap(), Rgb::new(0, 255, 0));
    /// assert!(Rgb::from_hex("#F00").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ColorError` if the input is empty, not 6 digits long, or
    /// contains a non-hex character.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.is_empty() {
            return Err(ColorError::Empty);
        }

        // Validate all characters are hex
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(c));
        }

        let bytes = hex.as_bytes();
        if bytes.len() != 6 {
            return Err(ColorError::InvalidLength(bytes.len()));
        }

        Ok(Self {
            r: parse_hex_pair(bytes[0], bytes[1])?,
            g: parse_hex_pair(bytes[2], bytes[3])?,
            b: parse_hex_pair(bytes[4], bytes[5])?,
        })
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Perceived brightness (ITU-R BT.601 weights), in `0.0..=255.0`.
    pub fn luminance(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Text color that stays readable on top of this color.
    pub fn contrast_text(self) -> Rgb {
        if self.luminance() < 128.0 {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Parse a single ASCII hex digit to u8 (0-15)
fn parse_hex_digit(c: u8) -> Result<u8, ColorError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c as char)),
    }
}

/// Parse a two-digit hex value to u8 (0-255)
fn parse_hex_pair(high: u8, low: u8) -> Result<u8, ColorError> {
    Ok(parse_hex_digit(high)? * 16 + parse_hex_digit(low)?)
}
