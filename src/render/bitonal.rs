//! # Bitonal Reduction
//!
//! A thermal head can only burn a dot or leave the paper alone. This module
//! decides, pixel by pixel, which of the two happens.
//!
//! ## Luminance Rule
//!
//! Every strategy shares the same brightness estimate:
//!
//! ```text
//! alpha <= 127  →  luminance = 255          (transparent, never printed)
//! otherwise     →  luminance = (r + g + b) / 3   (integer division)
//! ```
//!
//! The strategy then prints the dot iff `luminance < threshold`, where the
//! threshold is either a single cutoff ([`Threshold`]) or a cell of a tiling
//! matrix ([`OrderedDither`]).
//!
//! ## Strategies
//!
//! | Strategy | Threshold source | Look |
//! |----------|------------------|------|
//! | [`Threshold`] | One global cutoff | Hard black/white, banding on photos |
//! | [`OrderedDither`] | `matrix[x mod w][y mod h]` | Repeating dot pattern, simulates grey |

use super::dither::OrderedDither;
use crate::error::{RasterError, Result};
use crate::source::{Argb, PixelSource};

/// Alpha values at or below this are treated as fully transparent.
pub const TRANSPARENT_ALPHA: u8 = 127;

/// Brightness proxy used by every strategy.
#[inline]
pub fn luminance(px: Argb) -> u8 {
    if px.alpha <= TRANSPARENT_ALPHA {
        return 0xFF;
    }
    ((px.red as u16 + px.green as u16 + px.blue as u16) / 3) as u8
}

/// Single global cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    cutoff: u8,
}

impl Threshold {
    pub const DEFAULT_CUTOFF: u8 = 127;

    /// Accepts any integer so that out-of-range input is reported, not
    /// silently truncated.
    pub fn new(cutoff: i32) -> Result<Self> {
        let cutoff = u8::try_from(cutoff).map_err(|_| {
            RasterError::invalid(format!(
                "threshold cutoff must be between 0 and 255, got {}",
                cutoff
            ))
        })?;
        Ok(Self { cutoff })
    }

    pub fn cutoff(&self) -> u8 {
        self.cutoff
    }

    #[inline]
    pub fn decide(&self, px: Argb) -> bool {
        luminance(px) < self.cutoff
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            cutoff: Self::DEFAULT_CUTOFF,
        }
    }
}

/// The closed set of bitonal strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bitonal {
    Threshold(Threshold),
    OrderedDither(OrderedDither),
}

impl Bitonal {
    /// `true` means print a dot at `(x, y)`.
    #[inline]
    pub fn decide(&self, px: Argb, x: u32, y: u32) -> bool {
        match self {
            Bitonal::Threshold(t) => t.decide(px),
            Bitonal::OrderedDither(d) => d.decide(px, x, y),
        }
    }

    /// Same as [`Bitonal::decide`] with the channels passed separately.
    pub fn zero_or_one(&self, alpha: u8, red: u8, green: u8, blue: u8, x: u32, y: u32) -> u8 {
        self.decide(Argb::new(alpha, red, green, blue), x, y) as u8
    }
}

impl Default for Bitonal {
    fn default() -> Self {
        Bitonal::Threshold(Threshold::default())
    }
}

impl From<Threshold> for Bitonal {
    fn from(t: Threshold) -> Self {
        Bitonal::Threshold(t)
    }
}

impl From<OrderedDither> for Bitonal {
    fn from(d: OrderedDither) -> Self {
        Bitonal::OrderedDither(d)
    }
}

/// Fetch the pixel at `(x, y)` and ask `strategy` whether to print it.
#[inline]
pub fn bitonal_value<S: PixelSource + ?Sized>(
    source: &S,
    strategy: &Bitonal,
    x: u32,
    y: u32,
) -> bool {
    strategy.decide(source.argb_at(x, y), x, y)
}
