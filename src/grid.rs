//! Grid downsampling.
//!
//! Reduces a source image to a small grid by nearest-neighbor sampling:
//! each output cell takes exactly one source pixel, no averaging.

use image::RgbImage;

use crate::color::Rgb;
use crate::error::PatternError;

/// A row-major rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

/// A grid of colors.
pub type PixelGrid = Grid<Rgb>;

impl<T> Grid<T> {
    /// Build a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

/// Anything that can be sampled as an RGB raster.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`; callers stay within `dimensions()`.
    fn rgb(&self, x: u32, y: u32) -> Rgb;
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb(&self, x: u32, y: u32) -> Rgb {
        Rgb::from(*self.get_pixel(x, y))
    }
}

impl PixelSource for PixelGrid {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rgb(&self, x: u32, y: u32) -> Rgb {
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

impl From<&PixelGrid> for RgbImage {
    fn from(grid: &PixelGrid) -> Self {
        RgbImage::from_fn(grid.width, grid.height, |x, y| grid.rgb(x, y).into())
    }
}

/// Target height preserving the source aspect ratio, rounded down.
///
/// Computed in `u64`; a tall source at a large width can exceed `u32::MAX`.
pub fn target_height(source_width: u32, source_height: u32, target_width: u32) -> u64 {
    if source_width == 0 {
        return 0;
    }
    target_width as u64 * source_height as u64 / source_width as u64
}

/// Downsample `source` to `target_width` columns.
///
/// The height follows the source aspect ratio. Cell `(x, y)` copies source
/// pixel `(x * W0 / Wt, y * H0 / Ht)` using integer division, so sampling
/// is deterministic and never reads out of bounds.
///
/// # Errors
///
/// Returns `PatternError::InvalidDimensions` if the source is empty, the
/// target width is zero, or the derived height rounds down to zero or does
/// not fit in a `u32`.
pub fn downsample<S: PixelSource + ?Sized>(
    source: &S,
    target_width: u32,
) -> Result<PixelGrid, PatternError> {
    let (source_width, source_height) = source.dimensions();
    let derived = target_height(source_width, source_height, target_width);
    let height = match u32::try_from(derived) {
        Ok(height) if height > 0 => height,
        _ => {
            return Err(PatternError::InvalidDimensions {
                source_width,
                source_height,
                width: target_width,
                height: derived,
            })
        }
    };

    let sx = |x: u32| (x as u64 * source_width as u64 / target_width as u64) as u32;
    let sy = |y: u32| (y as u64 * source_height as u64 / height as u64) as u32;

    let mut cells = Vec::with_capacity(target_width as usize * height as usize);
    for y in 0..height {
        let src_y = sy(y);
        for x in 0..target_width {
            cells.push(source.rgb(sx(x), src_y));
        }
    }

    tracing::debug!(
        source_width,
        source_height,
        target_width,
        target_height = height,
        "Downsampled image"
    );
    Ok(Grid {
        width: target_width,
        height,
        cells,
    })
}
