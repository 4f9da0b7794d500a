//! # Rendering Module
//!
//! Turns true-colour pixels into print / no-print decisions.
//!
//! ## Modules
//!
//! - [`bitonal`]: shared luminance rule, [`Threshold`], and the [`Bitonal`] strategy set
//! - [`dither`]: [`OrderedDither`] with explicit or generated matrices
//! - [`shuffle`]: the fixed-seed generator behind generated matrices
//!
//! ## Usage Example
//!
//! ```
//! use dotraster::render::{Bitonal, OrderedDither, Threshold};
//! use dotraster::source::Argb;
//!
//! let hard = Bitonal::from(Threshold::new(100).unwrap());
//! let soft = Bitonal::from(OrderedDither::generate(3, 3, 100, 130).unwrap());
//!
//! let grey = Argb::opaque(110, 110, 110);
//! assert!(!hard.decide(grey, 0, 0));
//! let printed = (0..3).flat_map(|y| (0..3).map(move |x| (x, y)))
//!     .filter(|&(x, y)| soft.decide(grey, x, y))
//!     .count();
//! assert!(printed > 0 && printed < 9);
//! ```

pub mod bitonal;
pub mod dither;
pub mod shuffle;

pub use bitonal::{Bitonal, Threshold, bitonal_value, luminance};
pub use dither::OrderedDither;
