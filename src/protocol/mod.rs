//! # ESC/POS Image Framing
//!
//! Command builders that wrap finished raster layouts for ESC/POS receipt
//! printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: byte constants, justification, 16-bit length helpers
//! - [`graphics`]: `GS v 0`, `ESC *` and `GS ( L` image commands
//!
//! ## Usage Example
//!
//! ```
//! use dotraster::protocol::{commands::Justification, graphics};
//! use dotraster::raster::RasterCodec;
//! use dotraster::render::OrderedDither;
//! use image::{Rgba, RgbaImage};
//!
//! let img = RgbaImage::from_pixel(32, 48, Rgba([90, 90, 90, 255]));
//! let codec = RasterCodec::new(&img, OrderedDither::default());
//!
//! // Same codec, two command families: layouts are computed once each
//! let raster = graphics::raster_bit_image(&codec, Justification::Center, Default::default())?;
//! let bands = graphics::bit_image(&codec, Justification::Center, Default::default())?;
//!
//! assert_eq!(raster.len(), 3 + 8 + 4 * 48);
//! assert_eq!(bands.len(), 3 + 3 + 2 * (5 + 32 * 3 + 1));
//! # Ok::<(), dotraster::RasterError>(())
//! ```

pub mod commands;
pub mod graphics;
