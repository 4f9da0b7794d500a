//! # Render Profiles
//!
//! A render profile bundles everything needed to turn an image into printer
//! bytes: the bitonal strategy, the command family, and the justification.
//! Profiles are JSON so they can be kept next to the images they describe.
//!
//! ## Format
//!
//! ```json
//! {
//!   "bitonal": { "kind": "ordered_dither", "width": 3, "height": 3, "min": 100, "max": 130 },
//!   "mode": "bit_image",
//!   "bit_image_mode": "double_density24",
//!   "justification": "center"
//! }
//! ```
//!
//! | `bitonal.kind` | Fields | Defaults |
//! |----------------|--------|----------|
//! | `threshold` | `cutoff` | 127 |
//! | `ordered_dither` | `width`, `height`, `min`, `max` | 2, 2, 64, 127 |
//! | `matrix` | `rows` (`rows[y][x]`) | required |
//!
//! Every field is optional except `matrix.rows`. Numbers are read as plain
//! integers and range-checked when the strategy is built, so a cutoff of 300
//! is reported as an invalid parameter rather than a parse error.

use std::path::Path;

use serde::Deserialize;

use crate::error::{RasterError, Result};
use crate::protocol::commands::Justification;
use crate::protocol::graphics::{BitImageMode, GraphicsScale, ImageCommand, RasterMode};
use crate::render::{Bitonal, OrderedDither, Threshold};

/// Strategy section of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BitonalConfig {
    Threshold {
        #[serde(default = "default_cutoff")]
        cutoff: i32,
    },
    OrderedDither {
        #[serde(default = "default_matrix_size")]
        width: usize,
        #[serde(default = "default_matrix_size")]
        height: usize,
        #[serde(default = "default_min")]
        min: i32,
        #[serde(default = "default_max")]
        max: i32,
    },
    Matrix {
        rows: Vec<Vec<i32>>,
    },
}

fn default_cutoff() -> i32 {
    Threshold::DEFAULT_CUTOFF as i32
}

fn default_matrix_size() -> usize {
    OrderedDither::DEFAULT_SIZE
}

fn default_min() -> i32 {
    OrderedDither::DEFAULT_MIN as i32
}

fn default_max() -> i32 {
    OrderedDither::DEFAULT_MAX as i32
}

impl Default for BitonalConfig {
    fn default() -> Self {
        BitonalConfig::Threshold {
            cutoff: default_cutoff(),
        }
    }
}

impl BitonalConfig {
    /// Validate and build the strategy.
    pub fn build(&self) -> Result<Bitonal> {
        Ok(match self {
            BitonalConfig::Threshold { cutoff } => Threshold::new(*cutoff)?.into(),
            BitonalConfig::OrderedDither {
                width,
                height,
                min,
                max,
            } => OrderedDither::generate(*width, *height, *min, *max)?.into(),
            BitonalConfig::Matrix { rows } => {
                OrderedDither::from_rows(&matrix_cells(rows)?)?.into()
            }
        })
    }
}

fn matrix_cells(rows: &[Vec<i32>]) -> Result<Vec<Vec<u8>>> {
    rows.iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, &v)| {
                    u8::try_from(v).map_err(|_| {
                        RasterError::invalid(format!(
                            "matrix cell ({}, {}) must be between 0 and 255, got {}",
                            x, y, v
                        ))
                    })
                })
                .collect::<Result<Vec<u8>>>()
        })
        .collect()
}

/// Image command family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// `GS v 0`
    #[default]
    Raster,
    /// `ESC *`
    BitImage,
    /// `GS ( L`
    Graphics,
}

/// A complete render profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub bitonal: BitonalConfig,
    pub mode: Mode,
    pub raster_mode: RasterMode,
    pub bit_image_mode: BitImageMode,
    pub graphics_scale: GraphicsScale,
    pub justification: Justification,
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RasterError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| RasterError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn bitonal(&self) -> Result<Bitonal> {
        self.bitonal.build()
    }

    /// The command selected by `mode`, carrying that family's sub-mode.
    pub fn command(&self) -> ImageCommand {
        match self.mode {
            Mode::Raster => ImageCommand::Raster(self.raster_mode),
            Mode::BitImage => ImageCommand::BitImage(self.bit_image_mode),
            Mode::Graphics => ImageCommand::Graphics(self.graphics_scale),
        }
    }
}
