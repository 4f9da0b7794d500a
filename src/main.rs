//! # dotraster CLI
//!
//! Command-line interface for converting images into receipt printer bytes.
//!
//! ## Usage
//!
//! ```bash
//! # Convert with the default threshold, GS v 0 framing
//! dotraster convert logo.png
//!
//! # Ordered dither, ESC * bands, centred, with PNG previews
//! dotraster convert --dither 3x3:100-130 --mode bit-image --justify center --png *.png
//!
//! # Use a saved render profile
//! dotraster convert --config receipt.json -o out/ photo.jpg
//!
//! # Show a generated dither matrix
//! dotraster matrix 4 4 --min 0 --max 255
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{error, info};
use rayon::prelude::*;

use dotraster::{
    RasterCodec, RasterError,
    config::{BitonalConfig, Mode, RenderConfig},
    preview,
    protocol::commands::Justification,
    render::OrderedDither,
    source,
};

/// dotraster - receipt printer image converter
#[derive(Parser, Debug)]
#[command(name = "dotraster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert images into framed printer commands (<stem>.bin)
    Convert {
        /// Images to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// JSON render profile
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Image command family
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Global threshold cutoff (0-255)
        #[arg(long, conflicts_with = "dither")]
        threshold: Option<i32>,

        /// Ordered dither as WxH:MIN-MAX, e.g. 2x2:64-127
        #[arg(long, value_parser = parse_dither)]
        dither: Option<BitonalConfig>,

        /// Image placement
        #[arg(long, value_enum)]
        justify: Option<Justification>,

        /// Also write <stem>.png previews
        #[arg(long)]
        png: bool,
    },

    /// Print a generated dither matrix, one row per line
    Matrix {
        width: usize,
        height: usize,

        #[arg(long, default_value_t = OrderedDither::DEFAULT_MIN as i32)]
        min: i32,

        #[arg(long, default_value_t = OrderedDither::DEFAULT_MAX as i32)]
        max: i32,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), RasterError> {
    match command {
        Commands::Convert {
            inputs,
            out_dir,
            config,
            mode,
            threshold,
            dither,
            justify,
            png,
        } => {
            let mut profile = match config {
                Some(path) => RenderConfig::load(path)?,
                None => RenderConfig::default(),
            };
            if let Some(mode) = mode {
                profile.mode = mode;
            }
            if let Some(cutoff) = threshold {
                profile.bitonal = BitonalConfig::Threshold { cutoff };
            }
            if let Some(dither) = dither {
                profile.bitonal = dither;
            }
            if let Some(justification) = justify {
                profile.justification = justification;
            }

            // Fail on a bad strategy before touching any image.
            profile.bitonal()?;

            if let Some(dir) = &out_dir {
                std::fs::create_dir_all(dir)?;
            }

            // One codec per image, each on its own worker.
            let failures: Vec<RasterError> = inputs
                .par_iter()
                .filter_map(|input| {
                    convert(input, out_dir.as_deref(), &profile, png)
                        .map_err(|e| {
                            error!("{}: {}", input.display(), e);
                            e
                        })
                        .err()
                })
                .collect();

            match failures.into_iter().next() {
                Some(first) => Err(first),
                None => Ok(()),
            }
        }

        Commands::Matrix {
            width,
            height,
            min,
            max,
        } => {
            let matrix = OrderedDither::generate(width, height, min, max)?;
            for row in matrix.rows() {
                let cells: Vec<String> = row.iter().map(|v| format!("{:>3}", v)).collect();
                println!("{}", cells.join(" "));
            }
            Ok(())
        }
    }
}

/// Convert one image according to `profile`.
fn convert(
    input: &Path,
    out_dir: Option<&Path>,
    profile: &RenderConfig,
    png: bool,
) -> Result<(), RasterError> {
    let image = source::load(input)?;
    let codec = RasterCodec::new(&image, profile.bitonal()?);
    let bytes = profile.command().encode(&codec, profile.justification)?;

    let bin_path = output_path(input, out_dir, "bin");
    std::fs::write(&bin_path, &bytes)?;
    info!(
        "{} ({}x{}) -> {} ({} bytes)",
        input.display(),
        codec.width_bits(),
        codec.height_bits(),
        bin_path.display(),
        bytes.len()
    );

    if png {
        let png_path = output_path(input, out_dir, "png");
        preview::save_png(&codec, &png_path)?;
        info!("preview -> {}", png_path.display());
    }
    Ok(())
}

fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(extension);
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(name)
}

/// Parse `WxH:MIN-MAX`.
fn parse_dither(arg: &str) -> Result<BitonalConfig, String> {
    let usage = || format!("expected WxH:MIN-MAX (e.g. 2x2:64-127), got '{}'", arg);
    let (size, range) = arg.split_once(':').ok_or_else(usage)?;
    let (width, height) = size.split_once('x').ok_or_else(usage)?;
    let (min, max) = range.split_once('-').ok_or_else(usage)?;
    Ok(BitonalConfig::OrderedDither {
        width: width.trim().parse().map_err(|_| usage())?,
        height: height.trim().parse().map_err(|_| usage())?,
        min: min.trim().parse().map_err(|_| usage())?,
        max: max.trim().parse().map_err(|_| usage())?,
    })
}
