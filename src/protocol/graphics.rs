//! # ESC/POS Image Commands
//!
//! Wraps the layouts produced by [`RasterCodec`] in printer command framing.
//! The framers only read the codec's dimensions and byte layouts; all pixel
//! work has already happened by the time they run.
//!
//! ## Command Families
//!
//! | Command | Layout consumed | Notes |
//! |---------|-----------------|-------|
//! | `GS v 0` | flat raster | Whole image in one command, most printers |
//! | `ESC *` | 8- or 24-row slices | One command per band, oldest and most portable |
//! | `GS ( L` | flat raster | Stores into the graphics buffer, then prints it |
//!
//! Every framer starts with `ESC a n` so the image is placed according to
//! the requested [`Justification`].
//!
//! ## Length Fields
//!
//! Widths, heights and parameter counts are 16-bit little-endian. An image
//! too large for a field is rejected with
//! [`RasterError::InvalidParameter`](crate::error::RasterError::InvalidParameter)
//! instead of being silently truncated.

use serde::Deserialize;

use super::commands::{ESC, GS, Justification, LF, justify, length_le, line_spacing};
use crate::error::Result;
use crate::raster::{RasterCodec, SliceHeight};
use crate::source::PixelSource;

// ============================================================================
// RASTER BIT IMAGE (GS v 0)
// ============================================================================

/// Scaling applied by `GS v 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterMode {
    #[default]
    Normal,
    DoubleWidth,
    DoubleHeight,
    Quadruple,
}

impl RasterMode {
    pub const fn value(self) -> u8 {
        match self {
            RasterMode::Normal => 0,
            RasterMode::DoubleWidth => 1,
            RasterMode::DoubleHeight => 2,
            RasterMode::Quadruple => 3,
        }
    }
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: [`RasterMode`]
/// - `xL, xH`: Width in **bytes** (`horizontal_bytes`)
/// - `yL, yH`: Height in dots
/// - `d1...dk`: flat raster, k = width_bytes × height
///
/// ## Example
///
/// ```
/// use dotraster::protocol::commands::Justification;
/// use dotraster::protocol::graphics::{RasterMode, raster_bit_image};
/// use dotraster::raster::RasterCodec;
/// use dotraster::render::Threshold;
/// use image::{Rgba, RgbaImage};
///
/// let img = RgbaImage::from_pixel(9, 1, Rgba([0, 0, 0, 255]));
/// let codec = RasterCodec::new(&img, Threshold::default());
/// let cmd = raster_bit_image(&codec, Justification::Left, RasterMode::Normal).unwrap();
///
/// assert_eq!(
///     cmd,
///     vec![0x1B, 0x61, 0, 0x1D, 0x76, 0x30, 0, 2, 0, 1, 0, 0xFF, 0x80]
/// );
/// ```
pub fn raster_bit_image<S: PixelSource>(
    codec: &RasterCodec<S>,
    justification: Justification,
    mode: RasterMode,
) -> Result<Vec<u8>> {
    let [xl, xh] = length_le(codec.horizontal_bytes(), "raster width in bytes")?;
    let [yl, yh] = length_le(codec.height_bits() as usize, "raster height")?;
    let data = codec.flat_raster();

    let mut cmd = Vec::with_capacity(11 + data.len());
    cmd.extend(justify(justification));
    cmd.extend([GS, b'v', b'0', mode.value(), xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

// ============================================================================
// BIT IMAGE (ESC *)
// ============================================================================

/// Density and band height selected by `ESC *`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitImageMode {
    SingleDensity8,
    DoubleDensity8,
    SingleDensity24,
    #[default]
    DoubleDensity24,
}

impl BitImageMode {
    /// The `m` byte.
    pub const fn value(self) -> u8 {
        match self {
            BitImageMode::SingleDensity8 => 0,
            BitImageMode::DoubleDensity8 => 1,
            BitImageMode::SingleDensity24 => 32,
            BitImageMode::DoubleDensity24 => 33,
        }
    }

    pub const fn slice_height(self) -> SliceHeight {
        match self {
            BitImageMode::SingleDensity8 | BitImageMode::DoubleDensity8 => SliceHeight::Eight,
            BitImageMode::SingleDensity24 | BitImageMode::DoubleDensity24 => {
                SliceHeight::TwentyFour
            }
        }
    }
}

/// # Select Bit Image Mode (ESC * m nL nH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC * m nL nH d1...dk |
/// | Hex     | 1B 2A m nL nH d1...dk |
///
/// The image is sent as one `ESC *` command per band, each followed by `LF`.
/// Line spacing is set to 16 first so bands print without gaps.
///
/// ## Parameters
///
/// - `m`: [`BitImageMode`]
/// - `nL, nH`: Width in **dots**
/// - `d1...dk`: one band of row slices, k = width × slice_height / 8
pub fn bit_image<S: PixelSource>(
    codec: &RasterCodec<S>,
    justification: Justification,
    mode: BitImageMode,
) -> Result<Vec<u8>> {
    let [nl, nh] = length_le(codec.width_bits() as usize, "bit image width")?;
    let bands = codec.slices(mode.slice_height());

    let payload: usize = bands.iter().map(|b| b.len() + 6).sum();
    let mut cmd = Vec::with_capacity(6 + payload);
    cmd.extend(justify(justification));
    cmd.extend(line_spacing(16));
    for band in bands {
        cmd.extend([ESC, b'*', mode.value(), nl, nh]);
        cmd.extend_from_slice(band);
        cmd.push(LF);
    }
    Ok(cmd)
}

// ============================================================================
// GRAPHICS BUFFER (GS ( L)
// ============================================================================

/// Horizontal and vertical scale factors `(bx, by)` for `GS ( L`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphicsScale {
    #[default]
    Normal,
    DoubleWidth,
    DoubleHeight,
    Quadruple,
}

impl GraphicsScale {
    pub const fn factors(self) -> (u8, u8) {
        match self {
            GraphicsScale::Normal => (1, 1),
            GraphicsScale::DoubleWidth => (2, 1),
            GraphicsScale::DoubleHeight => (1, 2),
            GraphicsScale::Quadruple => (2, 2),
        }
    }
}

/// # Store and Print Graphics Data (GS ( L, fn 112 then fn 50)
///
/// | Step | Bytes |
/// |------|-------|
/// | Store | GS ( L pL pH 48 112 48 bx by 49 xL xH yL yH d1...dk |
/// | Print | GS ( L 2 0 48 50 |
///
/// ## Parameters
///
/// - `pL, pH`: `k + 10` (everything after `pH` in the store command)
/// - `bx, by`: [`GraphicsScale`] factors
/// - `49`: colour 1 (black)
/// - `xL, xH`: Width in **dots**
/// - `yL, yH`: Height in dots
/// - `d1...dk`: flat raster
pub fn graphics_image<S: PixelSource>(
    codec: &RasterCodec<S>,
    justification: Justification,
    scale: GraphicsScale,
) -> Result<Vec<u8>> {
    let [pl, ph] = length_le(codec.raster_size_bytes() + 10, "graphics parameter count")?;
    let [xl, xh] = length_le(codec.width_bits() as usize, "graphics width")?;
    let [yl, yh] = length_le(codec.height_bits() as usize, "graphics height")?;
    let (bx, by) = scale.factors();
    let data = codec.flat_raster();

    let mut cmd = Vec::with_capacity(3 + 15 + data.len() + 7);
    cmd.extend(justify(justification));
    cmd.extend([GS, b'(', b'L', pl, ph, 48, 112, 48, bx, by, 49, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd.extend([GS, b'(', b'L', 2, 0, 48, 50]);
    Ok(cmd)
}

// ============================================================================
// COMMAND SELECTION
// ============================================================================

/// Which image command to emit, with its mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCommand {
    Raster(RasterMode),
    BitImage(BitImageMode),
    Graphics(GraphicsScale),
}

impl Default for ImageCommand {
    fn default() -> Self {
        ImageCommand::Raster(RasterMode::default())
    }
}

impl ImageCommand {
    pub fn encode<S: PixelSource>(
        &self,
        codec: &RasterCodec<S>,
        justification: Justification,
    ) -> Result<Vec<u8>> {
        match *self {
            ImageCommand::Raster(mode) => raster_bit_image(codec, justification, mode),
            ImageCommand::BitImage(mode) => bit_image(codec, justification, mode),
            ImageCommand::Graphics(scale) => graphics_image(codec, justification, scale),
        }
    }
}
