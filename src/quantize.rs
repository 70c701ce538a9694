//! Free color quantization for art mode.
//!
//! Median cut in RGB space: distinct colors are grouped into boxes that
//! are repeatedly split along their widest channel at the pixel-weighted
//! median, then every cell is recolored with its box's weighted average.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::error::PatternError;
use crate::grid::PixelGrid;

#[derive(Debug, Clone, Copy)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn of(self, color: Rgb) -> u8 {
        match self {
            Channel::Red => color.r,
            Channel::Green => color.g,
            Channel::Blue => color.b,
        }
    }
}

/// Distinct colors with their pixel counts.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<(Rgb, u32)>,
}

impl ColorBox {
    fn widest_channel(&self) -> Channel {
        let range = |channel: Channel| {
            let values = self.colors.iter().map(|(c, _)| channel.of(*c));
            let min = values.clone().min().unwrap_or(0);
            let max = values.max().unwrap_or(0);
            max - min
        };
        let (r, g, b) = (
            range(Channel::Red),
            range(Channel::Green),
            range(Channel::Blue),
        );

        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the weighted median of the widest channel.
    ///
    /// Both halves are non-empty; callers only split boxes holding at least
    /// two colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.widest_channel();
        self.colors.sort_by_key(|(c, _)| (channel.of(*c), c.r, c.g, c.b));

        let total: u64 = self.pixel_count();
        let mut running = 0u64;
        let mut split_idx = self.colors.len() / 2;
        for (i, (_, count)) in self.colors.iter().enumerate() {
            running += *count as u64;
            if running >= total / 2 {
                split_idx = i + 1;
                break;
            }
        }
        split_idx = split_idx.clamp(1, self.colors.len() - 1);

        let right = self.colors.split_off(split_idx);
        (self, ColorBox { colors: right })
    }

    fn average(&self) -> Rgb {
        let total = self.pixel_count();
        if total == 0 {
            return Rgb::BLACK;
        }
        let weighted = |channel: Channel| {
            let sum: u64 = self
                .colors
                .iter()
                .map(|(c, n)| channel.of(*c) as u64 * *n as u64)
                .sum();
            (sum / total) as u8
        };
        Rgb::new(
            weighted(Channel::Red),
            weighted(Channel::Green),
            weighted(Channel::Blue),
        )
    }

    fn pixel_count(&self) -> u64 {
        self.colors.iter().map(|(_, n)| *n as u64).sum()
    }
}

/// Reduce `colors` (with pixel counts) to at most `max_colors` boxes.
///
/// Returns a map from every input color to its representative. Inputs that
/// already fit map to themselves.
fn median_cut(colors: Vec<(Rgb, u32)>, max_colors: usize) -> HashMap<Rgb, Rgb> {
    if colors.len() <= max_colors {
        return colors.into_iter().map(|(c, _)| (c, c)).collect();
    }

    let mut boxes = vec![ColorBox { colors }];
    while boxes.len() < max_colors {
        // Split the most populous box that can still be split
        let Some(idx) = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.pixel_count())
            .map(|(i, _)| i)
        else {
            break;
        };

        let (left, right) = boxes.remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    let mut mapping = HashMap::new();
    for b in &boxes {
        let representative = b.average();
        for (color, _) in &b.colors {
            mapping.insert(*color, representative);
        }
    }
    mapping
}

/// Distinct colors of a grid with their counts, in a stable order.
fn histogram(grid: &PixelGrid) -> Vec<(Rgb, u32)> {
    let mut counts: HashMap<Rgb, u32> = HashMap::new();
    for &color in grid.cells() {
        *counts.entry(color).or_insert(0) += 1;
    }
    let mut colors: Vec<(Rgb, u32)> = counts.into_iter().collect();
    colors.sort_by_key(|(c, _)| (c.r, c.g, c.b));
    colors
}

/// Number of distinct colors in a grid.
pub fn distinct_colors(grid: &PixelGrid) -> usize {
    histogram(grid).len()
}

/// Recolor `grid` with at most `max_colors` distinct colors.
///
/// # Errors
///
/// Returns `PatternError::InvalidColorCount` if `max_colors` is zero.
pub fn quantize(grid: &PixelGrid, max_colors: usize) -> Result<PixelGrid, PatternError> {
    if max_colors == 0 {
        return Err(PatternError::InvalidColorCount);
    }

    let colors = histogram(grid);
    let before = colors.len();
    let mapping = median_cut(colors, max_colors);
    let quantized = grid.map(|c| mapping.get(c).copied().unwrap_or(*c));

    tracing::info!(
        before,
        after = distinct_colors(&quantized),
        max_colors,
        "Quantized colors"
    );
    Ok(quantized)
}
