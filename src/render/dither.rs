//! # Ordered Dithering
//!
//! Ordered dithering compares each pixel against a small threshold matrix
//! that tiles across the image, instead of a single global cutoff. Mid-grey
//! areas then print as a regular dot pattern whose density follows the
//! brightness.
//!
//! ## Matrix Lookup
//!
//! ```text
//!            x mod w →
//!          ┌─────┬─────┐
//! y mod h  │ 106 │  64 │      print iff luminance < matrix[x mod w][y mod h]
//!    ↓     ├─────┼─────┤
//!          │ 127 │  85 │      (default 2x2 matrix, drawn with x across)
//!          └─────┴─────┘
//! ```
//!
//! ## Generated Matrices
//!
//! [`OrderedDither::generate`] spreads `w × h` thresholds evenly from `min`
//! to `max`:
//!
//! ```text
//! value(k) = min + k × (max - min) / (w×h - 1)     rounded half-up
//! ```
//!
//! and scatters them by shuffling the column and row indices with a fixed
//! seed (see [`super::shuffle`]). The k-th value lands at
//! `(shuffled_x[i], shuffled_y[j])` where `k = i × h + j`.
//!
//! The same parameters always give the same matrix, on every platform.
//!
//! ## Example
//!
//! ```
//! use dotraster::render::dither::OrderedDither;
//!
//! let dither = OrderedDither::default();
//! assert_eq!(dither.dimensions(), (2, 2));
//! assert_eq!(dither.matrix_value(0, 0), 106);
//! assert_eq!(dither.matrix_value(1, 0), 64);
//! ```

use log::debug;
use rand::SeedableRng;

use super::bitonal::luminance;
use super::shuffle::{JavaRandom, MATRIX_SEED, shuffle};
use crate::error::{RasterError, Result};
use crate::source::Argb;

/// Tiling threshold matrix, indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedDither {
    width: usize,
    height: usize,
    /// Column-major: cell `(x, y)` lives at `x * height + y`.
    cells: Vec<u8>,
}

impl OrderedDither {
    pub const DEFAULT_SIZE: usize = 2;
    pub const DEFAULT_MIN: u8 = 64;
    pub const DEFAULT_MAX: u8 = 127;
    /// Largest cell count [`OrderedDither::generate`] accepts.
    pub const MAX_GENERATED_CELLS: usize = 1 << 16;

    /// Use a hand-made matrix. `columns[x][y]` is the threshold at `(x, y)`.
    ///
    /// Every column must have the same, non-zero length.
    pub fn from_columns(columns: Vec<Vec<u8>>) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;
        if let Some(x) = columns.iter().position(|c| c.len() != height) {
            return Err(RasterError::invalid(format!(
                "dither matrix column {} has {} cells, expected {}",
                x,
                columns[x].len(),
                height
            )));
        }
        Ok(Self {
            width,
            height,
            cells: columns.into_iter().flatten().collect(),
        })
    }

    /// Use a hand-made matrix written the way it looks on paper:
    /// `rows[y][x]`.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;
        if let Some(y) = rows.iter().position(|r| r.len() != width) {
            return Err(RasterError::invalid(format!(
                "dither matrix row {} has {} cells, expected {}",
                y,
                rows[y].len(),
                width
            )));
        }
        let cells = (0..width)
            .flat_map(|x| rows.iter().map(move |row| row[x]))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a `width × height` matrix with thresholds spread from `min` to
    /// `max` and scattered by the fixed-seed shuffle.
    pub fn generate(width: usize, height: usize, min: i32, max: i32) -> Result<Self> {
        check_dimensions(width, height)?;
        let min = threshold_bound(min)?;
        let max = threshold_bound(max)?;
        if max < min {
            return Err(RasterError::invalid(format!(
                "max threshold {} must be >= min threshold {}",
                max, min
            )));
        }

        let count = width
            .checked_mul(height)
            .filter(|&n| n <= Self::MAX_GENERATED_CELLS)
            .ok_or_else(|| {
                RasterError::invalid(format!(
                    "dither matrix {}x{} exceeds {} cells",
                    width,
                    height,
                    Self::MAX_GENERATED_CELLS
                ))
            })?;

        let mut rng = JavaRandom::seed_from_u64(MATRIX_SEED);
        let shuffled_x = shuffle(width, &mut rng);
        let shuffled_y = shuffle(height, &mut rng);

        let mut cells = vec![0u8; count];
        let mut step = 0;
        for &x in &shuffled_x {
            for &y in &shuffled_y {
                cells[x * height + y] = interpolate(min, max, step, count);
                step += 1;
            }
        }

        debug!(
            "generated {}x{} dither matrix ({}..={})",
            width, height, min, max
        );
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// `(width, height)` of the matrix.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Threshold at `(x mod width, y mod height)`.
    #[inline]
    pub fn matrix_value(&self, x: usize, y: usize) -> u8 {
        self.cells[(x % self.width) * self.height + y % self.height]
    }

    /// The matrix as `rows[y][x]`.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|y| (0..self.width).map(|x| self.matrix_value(x, y)).collect())
            .collect()
    }

    #[inline]
    pub fn decide(&self, px: Argb, x: u32, y: u32) -> bool {
        luminance(px) < self.matrix_value(x as usize, y as usize)
    }
}

impl Default for OrderedDither {
    fn default() -> Self {
        // Default sizes are valid by construction.
        Self::generate(
            Self::DEFAULT_SIZE,
            Self::DEFAULT_SIZE,
            Self::DEFAULT_MIN as i32,
            Self::DEFAULT_MAX as i32,
        )
        .unwrap_or_else(|_| unreachable!())
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(RasterError::invalid(format!(
            "dither matrix width and height must be > 0, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

fn threshold_bound(value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        RasterError::invalid(format!(
            "dither thresholds must be between 0 and 255, got {}",
            value
        ))
    })
}

/// `min + step × (max - min) / (count - 1)`, rounded half-up.
fn interpolate(min: u8, max: u8, step: usize, count: usize) -> u8 {
    if count <= 1 {
        return min;
    }
    let span = (max - min) as usize;
    let denom = count - 1;
    let offset = (2 * step * span + denom) / (2 * denom);
    min + offset as u8
}
