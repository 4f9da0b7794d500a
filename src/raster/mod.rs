//! # Raster Codec
//!
//! [`RasterCodec`] packs the print / no-print decisions of a whole image into
//! the byte layouts printer commands expect. Each layout is computed on first
//! use and cached for the lifetime of the codec.
//!
//! ## Layouts
//!
//! | Method | Layout | Used by |
//! |--------|--------|---------|
//! | [`RasterCodec::flat_raster`] | Row-major, 8 horizontal dots per byte | `GS v 0`, `GS ( L` |
//! | [`RasterCodec::row_slices`] (8) | 8-row bands, 1 vertical byte per column | `ESC *` 8-dot modes |
//! | [`RasterCodec::row_slices`] (24) | 24-row bands, 3 vertical bytes per column | `ESC *` 24-dot modes |
//!
//! ## Flat Raster
//!
//! ```text
//! Row 0:    d[0]           d[1]  ...  d[hb-1]        hb = ceil(width / 8)
//! Row 1:    d[hb]          ...
//! ...
//! Each byte: bit 7 = leftmost dot, bit 0 = rightmost, 1 = print
//! ```
//!
//! Every row starts on a fresh byte. When `width` is not a multiple of 8 the
//! last byte of each row is padded with zero bits on the right.
//!
//! ## Row Slices
//!
//! ```text
//! band 0 (rows 0..h)      column 0        column 1        ...
//!                         ┌──────┐        ┌──────┐
//!                         │ b0   │ rows 0..8 (bit 7 = top)
//!                         │ b1   │ rows 8..16      (24-row bands only)
//!                         │ b2   │ rows 16..24     (24-row bands only)
//!                         └──────┘        └──────┘
//! ```
//!
//! Columns are emitted left to right. Every column occupies exactly
//! `slice_height / 8` bytes, including the columns of a short final band,
//! which are padded with zero bits below the image.
//!
//! ## Caching
//!
//! The source and strategy are fixed at construction, so a filled cache slot
//! never goes stale. Slots are [`OnceLock`]s: a codec may be shared between
//! threads and each layout is still computed exactly once.
//!
//! ## Example
//!
//! ```
//! use dotraster::raster::RasterCodec;
//! use dotraster::render::Threshold;
//! use image::{Rgba, RgbaImage};
//!
//! let black = RgbaImage::from_pixel(9, 1, Rgba([0, 0, 0, 255]));
//! let codec = RasterCodec::new(&black, Threshold::default());
//!
//! assert_eq!(codec.horizontal_bytes(), 2);
//! assert_eq!(codec.flat_raster(), &[0xFF, 0x80]);
//! ```

use std::sync::OnceLock;

use log::debug;

use crate::error::{RasterError, Result};
use crate::render::Bitonal;
use crate::source::{PixelSource, Region};

/// Band height of a row-slice layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceHeight {
    Eight,
    TwentyFour,
}

impl SliceHeight {
    /// Rows per band.
    pub const fn rows(self) -> u32 {
        match self {
            SliceHeight::Eight => 8,
            SliceHeight::TwentyFour => 24,
        }
    }

    /// Bytes per column.
    pub const fn column_bytes(self) -> usize {
        self.rows() as usize / 8
    }
}

impl TryFrom<u32> for SliceHeight {
    type Error = RasterError;

    fn try_from(rows: u32) -> Result<Self> {
        match rows {
            8 => Ok(SliceHeight::Eight),
            24 => Ok(SliceHeight::TwentyFour),
            other => Err(RasterError::invalid(format!(
                "slice height must be 8 or 24, got {}",
                other
            ))),
        }
    }
}

/// Bitonal raster encoder for one image and one strategy.
#[derive(Debug)]
pub struct RasterCodec<S> {
    source: S,
    strategy: Bitonal,
    flat: OnceLock<Vec<u8>>,
    rows_8: OnceLock<Vec<Vec<u8>>>,
    rows_24: OnceLock<Vec<Vec<u8>>>,
}

impl<S: PixelSource> RasterCodec<S> {
    /// `source` may be owned or borrowed (`&RgbaImage` is a source too).
    pub fn new(source: S, strategy: impl Into<Bitonal>) -> Self {
        Self {
            source,
            strategy: strategy.into(),
            flat: OnceLock::new(),
            rows_8: OnceLock::new(),
            rows_24: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn strategy(&self) -> &Bitonal {
        &self.strategy
    }

    /// Image width in dots.
    pub fn width_bits(&self) -> u32 {
        self.source.width()
    }

    /// Image height in dots.
    pub fn height_bits(&self) -> u32 {
        self.source.height()
    }

    /// Bytes per flat-raster row: `ceil(width / 8)`.
    pub fn horizontal_bytes(&self) -> usize {
        (self.width_bits() as usize).div_ceil(8)
    }

    /// Whether the dot at `(x, y)` prints. Coordinates must be in bounds.
    #[inline]
    pub fn is_printed(&self, x: u32, y: u32) -> bool {
        crate::render::bitonal_value(&self.source, &self.strategy, x, y)
    }

    /// Row-major, MSB-first, row-aligned bitmap. Computed once.
    pub fn flat_raster(&self) -> &[u8] {
        self.flat.get_or_init(|| {
            let data = self.encode_flat();
            debug!(
                "flat raster {}x{}: {} bytes",
                self.width_bits(),
                self.height_bits(),
                data.len()
            );
            data
        })
    }

    /// Length of [`RasterCodec::flat_raster`], computing it if needed.
    pub fn raster_size_bytes(&self) -> usize {
        self.flat_raster().len()
    }

    /// Row-slice layout for a raw band height. Only 8 and 24 are valid.
    pub fn row_slices(&self, slice_height: u32) -> Result<&[Vec<u8>]> {
        Ok(self.slices(SliceHeight::try_from(slice_height)?))
    }

    /// Row-slice layout, one `Vec<u8>` per band. Computed once per height.
    pub fn slices(&self, height: SliceHeight) -> &[Vec<u8>] {
        let slot = match height {
            SliceHeight::Eight => &self.rows_8,
            SliceHeight::TwentyFour => &self.rows_24,
        };
        slot.get_or_init(|| {
            let bands = self.encode_slices(height);
            debug!(
                "{}-row slices {}x{}: {} bands",
                height.rows(),
                self.width_bits(),
                self.height_bits(),
                bands.len()
            );
            bands
        })
    }

    fn is_empty(&self) -> bool {
        self.width_bits() == 0 || self.height_bits() == 0
    }

    fn encode_flat(&self) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }
        let width = self.width_bits();
        let mut data = Vec::with_capacity(self.horizontal_bytes() * self.height_bits() as usize);
        for y in 0..self.height_bits() {
            pack_row((0..width).map(|x| self.is_printed(x, y)), &mut data);
        }
        data
    }

    fn encode_slices(&self, height: SliceHeight) -> Vec<Vec<u8>> {
        if self.is_empty() {
            return Vec::new();
        }
        let width = self.width_bits();
        let rows = height.rows();
        let column_bytes = height.column_bytes();

        (0..self.height_bits())
            .step_by(rows as usize)
            .map(|top| {
                let band_rows = rows.min(self.height_bits() - top);
                let band = Region::new_unchecked(&self.source, 0, top, width, band_rows);
                let mut bytes = vec![0u8; width as usize * column_bytes];
                for x in 0..width {
                    let column = &mut bytes[x as usize * column_bytes..][..column_bytes];
                    for dy in 0..band_rows {
                        // Absolute y: dither tiles must line up across bands.
                        if self.strategy.decide(band.argb_at(x, dy), x, top + dy) {
                            column[dy as usize / 8] |= 0x80 >> (dy % 8);
                        }
                    }
                }
                bytes
            })
            .collect()
    }
}

/// Append one row of dots, MSB first, zero-padding the final byte.
pub fn pack_row(dots: impl IntoIterator<Item = bool>, out: &mut Vec<u8>) {
    let mut byte = 0u8;
    let mut bit = 0;
    for dot in dots {
        if dot {
            byte |= 0x80 >> bit;
        }
        bit += 1;
        if bit == 8 {
            out.push(byte);
            byte = 0;
            bit = 0;
        }
    }
    if bit > 0 {
        out.push(byte);
    }
}
