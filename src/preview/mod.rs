//! # Raster Preview
//!
//! Turns packed raster layouts back into black and white images, so a
//! conversion can be checked on screen before it is sent to paper.
//!
//! ## Example
//!
//! ```
//! use dotraster::preview;
//! use dotraster::raster::RasterCodec;
//! use dotraster::render::Threshold;
//! use image::{Rgba, RgbaImage};
//!
//! let img = RgbaImage::from_pixel(9, 2, Rgba([0, 0, 0, 255]));
//! let codec = RasterCodec::new(&img, Threshold::default());
//! let gray = preview::from_codec(&codec)?;
//!
//! assert_eq!(gray.dimensions(), (9, 2));
//! assert_eq!(gray.get_pixel(8, 1).0, [0]);
//!
//! // A buffer that does not match the dimensions is rejected
//! assert!(preview::from_flat(9, 2, &[0xFF]).is_err());
//! # Ok::<(), dotraster::RasterError>(())
//! ```

use std::path::Path;

use image::{GrayImage, ImageEncoder, Luma};
use log::debug;

use crate::error::{RasterError, Result};
use crate::raster::{RasterCodec, SliceHeight};
use crate::source::PixelSource;

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Unpack a flat raster (row-major, MSB first, rows byte-aligned).
///
/// `data` must hold exactly `height × ceil(width / 8)` bytes.
pub fn from_flat(width: u32, height: u32, data: &[u8]) -> Result<GrayImage> {
    let width_bytes = (width as usize).div_ceil(8);
    let expected = width_bytes * height as usize;
    if data.len() != expected {
        return Err(RasterError::invalid(format!(
            "flat raster for {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            data.len()
        )));
    }
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let byte = data[y as usize * width_bytes + x as usize / 8];
        if byte & (0x80 >> (x % 8)) != 0 { INK } else { PAPER }
    }))
}

/// Unpack row slices (column-major bands of `slice` rows).
///
/// There must be one band per `slice` rows of `height`, each holding
/// `width × slice / 8` bytes.
pub fn from_slices(
    width: u32,
    height: u32,
    bands: &[Vec<u8>],
    slice: SliceHeight,
) -> Result<GrayImage> {
    let column_bytes = slice.column_bytes();
    let band_count = height.div_ceil(slice.rows()) as usize;
    if width > 0 && bands.len() != band_count {
        return Err(RasterError::invalid(format!(
            "{} rows need {} bands of {}, got {}",
            height,
            band_count,
            slice.rows(),
            bands.len()
        )));
    }
    let band_len = width as usize * column_bytes;
    if let Some(i) = bands.iter().position(|b| b.len() != band_len) {
        return Err(RasterError::invalid(format!(
            "band {} has {} bytes, expected {}",
            i,
            bands[i].len(),
            band_len
        )));
    }
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let band = &bands[(y / slice.rows()) as usize];
        let dy = (y % slice.rows()) as usize;
        let byte = band[x as usize * column_bytes + dy / 8];
        if byte & (0x80 >> (dy % 8)) != 0 { INK } else { PAPER }
    }))
}

/// Preview of a codec's flat raster.
pub fn from_codec<S: PixelSource>(codec: &RasterCodec<S>) -> Result<GrayImage> {
    from_flat(codec.width_bits(), codec.height_bits(), codec.flat_raster())
}

/// Encode a preview as PNG bytes.
pub fn to_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| RasterError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(png_bytes)
}

/// Write a codec's preview to `path` as PNG.
pub fn save_png<S: PixelSource>(codec: &RasterCodec<S>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let png = to_png(&from_codec(codec)?)?;
    std::fs::write(path, &png)?;
    debug!("wrote preview {} ({} bytes)", path.display(), png.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{OrderedDither, Threshold};
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_from_flat_bit_order() {
        let img = from_flat(9, 1, &[0x80, 0x80]).unwrap();
        assert_eq!(img.get_pixel(0, 0), &INK);
        assert_eq!(img.get_pixel(1, 0), &PAPER);
        assert_eq!(img.get_pixel(8, 0), &INK);
    }

    #[test]
    fn test_flat_and_slices_describe_same_bitmap() {
        let src = RgbaImage::from_fn(13, 30, |x, y| {
            let v = ((x * 19 + y * 7) % 256) as u8;
            Rgba([v, v, v, 255])
        });
        let codec = RasterCodec::new(&src, OrderedDither::generate(3, 3, 40, 200).unwrap());
        let flat = from_codec(&codec).unwrap();
        for slice in [SliceHeight::Eight, SliceHeight::TwentyFour] {
            let banded = from_slices(13, 30, codec.slices(slice), slice).unwrap();
            assert_eq!(flat, banded, "{:?} slices disagree with flat raster", slice);
        }
    }

    #[test]
    fn test_png_signature() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let codec = RasterCodec::new(&src, Threshold::default());
        let png = to_png(&from_codec(&codec).unwrap()).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        // 9 dots wide needs 2 bytes per row
        assert!(matches!(
            from_flat(9, 1, &[0xFF]),
            Err(RasterError::InvalidParameter(_))
        ));
        assert!(matches!(
            from_flat(8, 2, &[0xFF, 0xFF, 0xFF]),
            Err(RasterError::InvalidParameter(_))
        ));
        assert!(from_flat(0, 0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_slices_rejects_missing_band() {
        // 10 rows in 8-row bands needs 2 bands
        let bands = vec![vec![0xFF, 0xFF]];
        assert!(matches!(
            from_slices(2, 10, &bands, SliceHeight::Eight),
            Err(RasterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_from_slices_rejects_short_band() {
        // 2 columns of 1 byte each, second band is one column short
        let bands = vec![vec![0xFF, 0xFF], vec![0xC0]];
        assert!(matches!(
            from_slices(2, 10, &bands, SliceHeight::Eight),
            Err(RasterError::InvalidParameter(_))
        ));
        // 24-row bands need 3 bytes per column
        assert!(matches!(
            from_slices(1, 10, &[vec![0xFF]], SliceHeight::TwentyFour),
            Err(RasterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_from_slices_accepts_codec_layout_of_empty_image() {
        let src = RgbaImage::new(0, 5);
        let codec = RasterCodec::new(&src, Threshold::default());
        let img = from_slices(0, 5, codec.slices(SliceHeight::Eight), SliceHeight::Eight).unwrap();
        assert_eq!(img.dimensions(), (0, 5));
    }
}
