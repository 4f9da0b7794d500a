//! # Codec Tests
//!
//! End-to-end checks of the raster codec through the public API: the fixed
//! scenarios printers depend on, plus invariants over random images.

use dotraster::preview;
use dotraster::protocol::commands::Justification;
use dotraster::protocol::graphics::{self, BitImageMode, RasterMode};
use dotraster::{
    Argb, Bitonal, OrderedDither, PixelSource, RasterCodec, RasterError, SliceHeight, Threshold,
};
use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Random image with a mix of opaque and transparent pixels.
fn random_image(rng: &mut StdRng, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.random(), rng.random(), rng.random(), rng.random()])
    })
}

fn strategies() -> Vec<Bitonal> {
    vec![
        Threshold::default().into(),
        Threshold::new(40).unwrap().into(),
        OrderedDither::default().into(),
        OrderedDither::generate(5, 3, 20, 230).unwrap().into(),
    ]
}

// ============================================================================
// FIXED SCENARIOS
// ============================================================================

#[test]
fn nine_by_one_black() {
    let img = RgbaImage::from_pixel(9, 1, BLACK);
    let codec = RasterCodec::new(&img, Threshold::new(127).unwrap());
    assert_eq!(codec.horizontal_bytes(), 2);
    assert_eq!(codec.flat_raster(), &[0xFF, 0x80]);
}

#[test]
fn eight_by_three_white() {
    for cutoff in [0, 127, 254] {
        let img = RgbaImage::from_pixel(8, 3, WHITE);
        let codec = RasterCodec::new(&img, Threshold::new(cutoff).unwrap());
        assert_eq!(codec.flat_raster(), &[0x00, 0x00, 0x00]);
    }
}

#[test]
fn one_by_ten_black_eight_row_slices() {
    let img = RgbaImage::from_pixel(1, 10, BLACK);
    let codec = RasterCodec::new(&img, Threshold::new(127).unwrap());
    let bands = codec.row_slices(8).unwrap();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0], vec![0xFF]);
    assert_eq!(bands[1], vec![0xC0]);
}

#[test]
fn default_dither_matrix_is_published_value() {
    let a = OrderedDither::default();
    let b = OrderedDither::generate(2, 2, 64, 127).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.rows(), vec![vec![106, 64], vec![127, 85]]);
}

#[test]
fn default_dither_on_mid_grey() {
    // luminance 100: prints where the cell threshold is above 100
    let img = RgbaImage::from_pixel(4, 2, Rgba([100, 100, 100, 255]));
    let codec = RasterCodec::new(&img, OrderedDither::default());
    assert_eq!(codec.flat_raster(), &[0b1010_0000, 0b1010_0000]);
}

#[test]
fn transparent_pixels_never_print() {
    let img = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 127]));
    for strategy in strategies() {
        let codec = RasterCodec::new(&img, strategy);
        assert!(codec.flat_raster().iter().all(|&b| b == 0));
        assert!(codec.slices(SliceHeight::TwentyFour).concat().iter().all(|&b| b == 0));
    }
}

#[test]
fn invalid_parameters_fail_at_construction() {
    assert!(matches!(
        Threshold::new(256),
        Err(RasterError::InvalidParameter(_))
    ));
    assert!(matches!(
        OrderedDither::generate(0, 1, 0, 10),
        Err(RasterError::InvalidParameter(_))
    ));
    assert!(matches!(
        OrderedDither::generate(2, 2, 10, 5),
        Err(RasterError::InvalidParameter(_))
    ));
    let img = RgbaImage::from_pixel(1, 1, BLACK);
    let codec = RasterCodec::new(&img, Threshold::default());
    assert!(matches!(
        codec.row_slices(16),
        Err(RasterError::InvalidParameter(_))
    ));
}

#[test]
fn raster_command_for_small_logo() {
    let mut img = RgbaImage::from_pixel(10, 2, WHITE);
    img.put_pixel(0, 0, BLACK);
    img.put_pixel(9, 1, BLACK);
    let codec = RasterCodec::new(&img, Threshold::default());
    let cmd = graphics::raster_bit_image(&codec, Justification::Center, RasterMode::Normal)
        .unwrap();
    assert_eq!(
        cmd,
        vec![
            0x1B, 0x61, 1, // centre
            0x1D, 0x76, 0x30, 0, 2, 0, 2, 0, // GS v 0, 2 bytes x 2 rows
            0x80, 0x00, // row 0
            0x00, 0x40, // row 1
        ]
    );
}

// ============================================================================
// INVARIANTS OVER RANDOM IMAGES
// ============================================================================

#[test]
fn flat_raster_length() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let (w, h) = (rng.random_range(0..40), rng.random_range(0..40));
        let img = random_image(&mut rng, w, h);
        let codec = RasterCodec::new(&img, OrderedDither::default());
        assert_eq!(
            codec.flat_raster().len(),
            codec.height_bits() as usize * codec.horizontal_bytes()
        );
        assert_eq!(codec.raster_size_bytes(), codec.flat_raster().len());
    }
}

#[test]
fn slice_columns_have_fixed_height() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..40 {
        let (w, h) = (rng.random_range(1..30), rng.random_range(1..60));
        let img = random_image(&mut rng, w, h);
        let codec = RasterCodec::new(&img, Threshold::default());
        for slice in [8u32, 24] {
            let bands = codec.row_slices(slice).unwrap();
            assert_eq!(bands.len(), h.div_ceil(slice) as usize);
            for band in bands {
                assert_eq!(band.len(), w as usize * slice as usize / 8);
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let mut rng = StdRng::seed_from_u64(3);
    let img = random_image(&mut rng, 37, 50);
    for strategy in strategies() {
        let codec = RasterCodec::new(&img, strategy.clone());
        let flat = codec.flat_raster().to_vec();
        let eight = codec.slices(SliceHeight::Eight).to_vec();
        let twenty_four = codec.slices(SliceHeight::TwentyFour).to_vec();
        assert_eq!(codec.flat_raster(), flat.as_slice());
        assert_eq!(codec.slices(SliceHeight::Eight), eight.as_slice());
        assert_eq!(codec.slices(SliceHeight::TwentyFour), twenty_four.as_slice());

        // A fresh codec over the same inputs agrees byte for byte.
        let fresh = RasterCodec::new(&img, strategy);
        assert_eq!(fresh.slices(SliceHeight::TwentyFour), twenty_four.as_slice());
        assert_eq!(fresh.flat_raster(), flat.as_slice());
    }
}

#[test]
fn layouts_agree_with_each_other() {
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        let (w, h) = (rng.random_range(1..40), rng.random_range(1..70));
        let img = random_image(&mut rng, w, h);
        let codec = RasterCodec::new(&img, OrderedDither::generate(3, 4, 30, 220).unwrap());
        let flat = preview::from_codec(&codec).unwrap();
        for slice in [SliceHeight::Eight, SliceHeight::TwentyFour] {
            assert_eq!(
                preview::from_slices(w, h, codec.slices(slice), slice).unwrap(),
                flat
            );
        }
    }
}

#[test]
fn threshold_is_monotone_in_cutoff() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let px = Argb::new(
            rng.random_range(128..=255),
            rng.random(),
            rng.random(),
            rng.random(),
        );
        let low = rng.random_range(0..=255);
        let high = rng.random_range(low..=255);
        let printed_low = Threshold::new(low).unwrap().decide(px);
        let printed_high = Threshold::new(high).unwrap().decide(px);
        assert!(!printed_low || printed_high, "{:?} {} {}", px, low, high);
    }
}

#[test]
fn codec_over_region_matches_band_of_full_image() {
    let mut rng = StdRng::seed_from_u64(9);
    let img = random_image(&mut rng, 24, 24);
    let full = RasterCodec::new(&img, Threshold::default());
    let band = img.subregion(0, 8, 24, 8).unwrap();
    let banded = RasterCodec::new(band, Threshold::default());
    assert_eq!(banded.flat_raster(), &full.flat_raster()[8 * 3..16 * 3]);
}

#[test]
fn shared_codec_across_threads() {
    let mut rng = StdRng::seed_from_u64(13);
    let img = random_image(&mut rng, 64, 48);
    let codec = RasterCodec::new(&img, OrderedDither::default());
    let results: Vec<Vec<u8>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| codec.flat_raster().to_vec()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0], codec.flat_raster());
}

#[test]
fn bit_image_bands_match_slices() {
    let mut rng = StdRng::seed_from_u64(17);
    let img = random_image(&mut rng, 20, 30);
    let codec = RasterCodec::new(&img, Threshold::default());
    let cmd = graphics::bit_image(&codec, Justification::Left, BitImageMode::DoubleDensity24)
        .unwrap();
    let bands = codec.slices(SliceHeight::TwentyFour);
    // ESC a n + ESC 3 n, then per band: ESC * m nL nH + data + LF
    assert_eq!(cmd.len(), 6 + bands.iter().map(|b| 5 + b.len() + 1).sum::<usize>());
    assert_eq!(&cmd[6..11], &[0x1B, 0x2A, 33, 20, 0]);
    assert_eq!(&cmd[11..11 + 60], bands[0].as_slice());
}
