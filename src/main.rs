//! # Croquis CLI
//!
//! File-based front end for the compositing engine: pad images for
//! outpainting, extract inpaint masks from painted overlays, and resolve
//! aspect ratios.
//!
//! ## Usage
//!
//! ```bash
//! # Pad photo.jpg to 16:9 and write the padded canvas + border mask
//! croquis outpaint photo.jpg --ratio 16:9 --out padded.png --mask mask.png
//!
//! # Pad to the ratio closest to the source's own dimensions
//! croquis outpaint photo.jpg --out padded.png --mask mask.png
//!
//! # Extract a binary mask from a painted overlay
//! croquis mask overlay.png --out mask.png
//!
//! # Print the closest supported ratio for an image
//! croquis ratio photo.jpg
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use croquis::error::CroquisError;
use croquis::image_file::{ImageFile, MimeType};
use croquis::mask::MaskKey;
use croquis::outpaint;
use croquis::raster::RasterSurface;
use croquis::ratio::{AspectRatio, RatioTarget};

/// Croquis - raster compositing and masking utility
#[derive(Parser, Debug)]
#[command(name = "croquis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pad an image to a target aspect ratio and write padded + mask PNGs
    Outpaint {
        /// Source image (png, jpeg or webp)
        input: PathBuf,

        /// Target ratio (1:1, 4:3, 3:4, 16:9, 9:16); omit to match the source
        #[arg(long)]
        ratio: Option<String>,

        /// Output path for the padded canvas
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Output path for the border mask
        #[arg(long, value_name = "FILE")]
        mask: PathBuf,
    },

    /// Extract a binary inpaint mask from a painted overlay
    Mask {
        /// Painted overlay image (png, jpeg or webp)
        input: PathBuf,

        /// Output path for the mask PNG
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Red-channel threshold for the paint signature
        #[arg(long, default_value = "100")]
        threshold: u8,
    },

    /// Print the closest supported aspect ratio for an image
    Ratio {
        /// Image to measure
        input: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CroquisError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Outpaint {
            input,
            ratio,
            out,
            mask,
        } => {
            let target = match ratio.as_deref() {
                Some(name) => RatioTarget::Ratio(parse_ratio(name)?),
                None => RatioTarget::MatchSource,
            };
            let source = read_image(&input)?;
            let artifacts = outpaint::compose(&source, target)?;

            println!(
                "Padded to {}x{} ({}), original at +{}+{}",
                artifacts.geometry.target_width,
                artifacts.geometry.target_height,
                artifacts.resolved_ratio,
                artifacts.geometry.offset_x,
                artifacts.geometry.offset_y,
            );
            fs::write(&out, artifacts.padded.data())?;
            println!("Saved padded canvas to {}", out.display());
            fs::write(&mask, artifacts.mask.to_image_file()?.data())?;
            println!("Saved border mask to {}", mask.display());
        }

        Commands::Mask {
            input,
            out,
            threshold,
        } => {
            let overlay = read_image(&input)?.decode()?;
            let key = MaskKey {
                red_threshold: threshold,
                ..MaskKey::default()
            };
            let mask = key.extract(&RasterSurface::from_pixels(overlay)?);
            if mask.is_empty() {
                println!("Warning: no painted pixels found; mask preserves everything");
            }
            fs::write(&out, mask.to_image_file()?.data())?;
            println!("Saved mask to {}", out.display());
        }

        Commands::Ratio { input } => {
            let pixels = read_image(&input)?.decode()?;
            let (w, h) = pixels.dimensions();
            println!("{}x{} -> {}", w, h, AspectRatio::closest(w, h)?);
        }
    }

    Ok(())
}

fn parse_ratio(name: &str) -> Result<AspectRatio, CroquisError> {
    AspectRatio::parse(name).ok_or_else(|| {
        CroquisError::Decode(format!(
            "unknown ratio '{}'; supported: {}",
            name,
            AspectRatio::ALL.map(|r| r.name()).join(", ")
        ))
    })
}

/// Read a file and wrap it as an [`ImageFile`], inferring the mime type
/// from the extension.
fn read_image(path: &Path) -> Result<ImageFile, CroquisError> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => MimeType::Png,
        Some("jpg") | Some("jpeg") => MimeType::Jpeg,
        Some("webp") => MimeType::Webp,
        other => {
            return Err(CroquisError::Decode(format!(
                "unsupported image extension: {:?}",
                other.unwrap_or("none")
            )));
        }
    };
    Ok(ImageFile::new(fs::read(path)?, mime))
}
