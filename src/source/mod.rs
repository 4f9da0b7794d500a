//! # Pixel Sources
//!
//! Read-only access to a true-colour bitmap, independent of whichever
//! decoder produced it.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► x (width)
//!   │
//!   │   each (x, y) yields one ARGB pixel
//!   │
//!   ▼
//!   y (height, paper feed direction)
//! ```
//!
//! ## Views
//!
//! [`PixelSource::subregion`] returns a [`Region`]: a rectangle over the same
//! pixel storage. Nothing is copied, so slicing a large photo into bands is
//! as cheap as slicing a `&[u8]`.
//!
//! ## Example
//!
//! ```
//! use dotraster::source::{Argb, PixelSource};
//! use image::{Rgba, RgbaImage};
//!
//! let img = RgbaImage::from_pixel(16, 4, Rgba([0, 0, 0, 255]));
//! let band = img.subregion(8, 1, 8, 2).unwrap();
//!
//! assert_eq!(band.width(), 8);
//! assert_eq!(band.argb_at(0, 0), Argb::opaque(0, 0, 0));
//! ```

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};
use log::debug;

use crate::error::{RasterError, Result};

/// One pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Argb {
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Fully opaque colour.
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(0xFF, red, green, blue)
    }

    /// Split a packed `0xAARRGGBB` word.
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            alpha: (argb >> 24) as u8,
            red: (argb >> 16) as u8,
            green: (argb >> 8) as u8,
            blue: argb as u8,
        }
    }

    /// Pack into `0xAARRGGBB`.
    pub const fn to_u32(self) -> u32 {
        (self.alpha as u32) << 24
            | (self.red as u32) << 16
            | (self.green as u32) << 8
            | self.blue as u32
    }
}

/// A 2D ARGB bitmap that can be read but never written.
///
/// `argb_at` is only defined for `x < width()` and `y < height()`;
/// implementations may panic outside that range. Use [`PixelSource::get`]
/// when the coordinates are not known to be in bounds.
pub trait PixelSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn argb_at(&self, x: u32, y: u32) -> Argb;

    /// Bounds-checked pixel lookup.
    fn get(&self, x: u32, y: u32) -> Option<Argb> {
        (x < self.width() && y < self.height()).then(|| self.argb_at(x, y))
    }

    /// Rectangular view sharing this source's storage.
    ///
    /// The rectangle must lie entirely within the source, otherwise
    /// [`RasterError::InvalidParameter`] is returned.
    fn subregion(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Region<'_, Self>>
    where
        Self: Sized,
    {
        Region::new(self, x, y, width, height)
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn argb_at(&self, x: u32, y: u32) -> Argb {
        (**self).argb_at(x, y)
    }
}

/// Zero-copy rectangle over another [`PixelSource`].
#[derive(Debug, Clone, Copy)]
pub struct Region<'a, S: ?Sized> {
    source: &'a S,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl<'a, S: PixelSource + ?Sized> Region<'a, S> {
    pub fn new(source: &'a S, x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        let fits = |origin: u32, extent: u32, limit: u32| {
            origin.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(x, width, source.width()) || !fits(y, height, source.height()) {
            return Err(RasterError::invalid(format!(
                "region {}x{} at ({}, {}) exceeds source bounds {}x{}",
                width,
                height,
                x,
                y,
                source.width(),
                source.height()
            )));
        }
        Ok(Self {
            source,
            x,
            y,
            width,
            height,
        })
    }

    /// Caller guarantees the rectangle lies within `source`.
    pub(crate) fn new_unchecked(source: &'a S, x: u32, y: u32, width: u32, height: u32) -> Self {
        debug_assert!(x + width <= source.width() && y + height <= source.height());
        Self {
            source,
            x,
            y,
            width,
            height,
        }
    }

    /// Offset of this view inside its parent.
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

impl<S: PixelSource + ?Sized> PixelSource for Region<'_, S> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn argb_at(&self, x: u32, y: u32) -> Argb {
        debug_assert!(x < self.width && y < self.height);
        self.source.argb_at(self.x + x, self.y + y)
    }
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn argb_at(&self, x: u32, y: u32) -> Argb {
        let Rgba([red, green, blue, alpha]) = *self.get_pixel(x, y);
        Argb::new(alpha, red, green, blue)
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn argb_at(&self, x: u32, y: u32) -> Argb {
        let Rgba([red, green, blue, alpha]) = self.get_pixel(x, y);
        Argb::new(alpha, red, green, blue)
    }
}

/// Decode an image file (any format the `image` crate understands) to RGBA.
pub fn load(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| RasterError::Image(format!("Failed to open {}: {}", path.display(), e)))?;
    let (width, height) = GenericImageView::dimensions(&decoded);
    debug!("decoded {} ({}x{})", path.display(), width, height);
    Ok(decoded.to_rgba8())
}
