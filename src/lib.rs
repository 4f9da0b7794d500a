//! # dotraster - Bitonal Raster Codec for Receipt Printers
//!
//! dotraster turns true-colour images into the 1-bit layouts that thermal
//! and dot-matrix receipt printers consume. It provides:
//!
//! - **Pixel sources**: a read-only [`PixelSource`] trait with zero-copy views
//! - **Bitonal strategies**: global [`Threshold`] and [`OrderedDither`]
//! - **Raster codec**: flat rasters and 8/24-row slices, computed once and cached
//! - **Framing**: ESC/POS `GS v 0`, `ESC *` and `GS ( L` image commands
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotraster::{
//!     protocol::{commands::Justification, graphics},
//!     raster::RasterCodec,
//!     render::OrderedDither,
//!     source,
//! };
//!
//! let image = source::load("logo.png")?;
//! let codec = RasterCodec::new(&image, OrderedDither::default());
//!
//! let bytes = graphics::raster_bit_image(&codec, Justification::Center, Default::default())?;
//! std::fs::write("logo.bin", bytes)?;
//!
//! # Ok::<(), dotraster::RasterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`source`] | Pixel access and sub-image views |
//! | [`render`] | Bitonal strategies |
//! | [`raster`] | Packing engine and caches |
//! | [`protocol`] | ESC/POS image commands |
//! | [`preview`] | Raster to PNG |
//! | [`config`] | JSON render profiles |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod preview;
pub mod protocol;
pub mod raster;
pub mod render;
pub mod source;

// Re-exports for convenience
pub use error::{RasterError, Result};
pub use raster::{RasterCodec, SliceHeight};
pub use render::{Bitonal, OrderedDither, Threshold};
pub use source::{Argb, PixelSource};
