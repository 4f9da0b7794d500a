//! # ESC/POS Command Basics
//!
//! Shared byte constants and the justification command used in front of
//! every image.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]` (`xL xH`)

use serde::Deserialize;

use crate::error::{RasterError, Result};

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// Split a u16 into `[low, high]`.
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Like [`u16_le`] for lengths that may not fit in a length field.
pub fn length_le(value: usize, field: &str) -> Result<[u8; 2]> {
    u16::try_from(value).map(u16_le).map_err(|_| {
        RasterError::invalid(format!("{} {} does not fit in 16 bits", field, value))
    })
}

/// Horizontal placement of the printed image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

impl Justification {
    pub const fn value(self) -> u8 {
        match self {
            Justification::Left => 0,
            Justification::Center => 1,
            Justification::Right => 2,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// `n`: 0 = left, 1 = center, 2 = right
///
/// ## Example
///
/// ```
/// use dotraster::protocol::commands::{justify, Justification};
///
/// assert_eq!(justify(Justification::Center), vec![0x1B, 0x61, 1]);
/// ```
#[inline]
pub fn justify(justification: Justification) -> Vec<u8> {
    vec![ESC, b'a', justification.value()]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Spacing in motion units. Bit images use 16 so consecutive bands
/// butt up against each other.
#[inline]
pub fn line_spacing(dots: u8) -> Vec<u8> {
    vec![ESC, b'3', dots]
}
