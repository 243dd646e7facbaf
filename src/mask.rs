//! # Mask Extraction
//!
//! Turns a painted overlay (semi-transparent daubs over an image) into a
//! strict binary mask for an inpainting request: white where paint was
//! found ("regenerate this"), black everywhere else ("preserve").
//!
//! Classification is a pure per-pixel threshold on the overlay's paint
//! signature. The thresholds live in [`MaskKey`] rather than in constants
//! so the extractor can be retuned for a different paint color without
//! touching the algorithm.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::CroquisError;
use crate::image_file::ImageFile;
use crate::raster::RasterSurface;

/// Paint signature thresholds for classifying overlay pixels.
///
/// The defaults match a warm semi-transparent brush
/// (`rgba(255, 143, 171, 0.7)`): any pixel with a red channel above 100
/// and non-zero alpha counts as painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskKey {
    /// Red channel must exceed this to count as painted.
    pub red_threshold: u8,
    /// Require non-zero alpha in addition to the red test.
    pub require_alpha: bool,
}

impl Default for MaskKey {
    fn default() -> Self {
        Self {
            red_threshold: 100,
            require_alpha: true,
        }
    }
}

impl MaskKey {
    /// The brush color this key's defaults are tuned for — the color a UI
    /// should paint mask daubs in.
    pub const PAINT_COLOR: Rgba<u8> = Rgba([255, 143, 171, 179]);

    /// Whether one overlay pixel matches the paint signature.
    #[inline]
    pub fn matches(&self, px: Rgba<u8>) -> bool {
        px[0] > self.red_threshold && (!self.require_alpha || px[3] > 0)
    }

    /// Classify every pixel of `overlay` into a binary mask of identical
    /// dimensions.
    ///
    /// Deterministic and pure: the same overlay always yields a
    /// byte-identical mask, and running the extractor on its own output is
    /// a fixed point (white has red 255, black has red 0).
    ///
    /// An overlay with no painted pixels yields an all-black mask — a
    /// valid "preserve everything" result; rejecting empty edit regions is
    /// the calling workflow's policy, not this function's.
    pub fn extract(&self, overlay: &RasterSurface) -> Mask {
        let mut out = overlay.clone();
        let width = overlay.width();
        let height = overlay.height();
        for y in 0..height {
            for x in 0..width {
                // In-bounds by construction
                let px = overlay.get_pixel(x, y).unwrap_or(Rgba([0, 0, 0, 0]));
                let color = if self.matches(px) {
                    Mask::FILL
                } else {
                    Mask::PRESERVE
                };
                out.set_pixel(x, y, color);
            }
        }
        Mask { surface: out }
    }
}

/// A binary raster: [`Mask::FILL`] marks the region to regenerate,
/// [`Mask::PRESERVE`] the region to keep. Always fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    surface: RasterSurface,
}

impl Mask {
    /// "Regenerate here" — pure white, opaque.
    pub const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
    /// "Keep as-is" — pure black, opaque.
    pub const PRESERVE: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// Wrap a surface that is binary by construction.
    pub(crate) fn from_surface(surface: RasterSurface) -> Self {
        Self { surface }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// True when no pixel is marked for regeneration.
    pub fn is_empty(&self) -> bool {
        self.surface.pixels().pixels().all(|px| *px == Self::PRESERVE)
    }

    /// The underlying binary surface.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Encode as a PNG [`ImageFile`] for the generation request.
    pub fn to_image_file(&self) -> Result<ImageFile, CroquisError> {
        ImageFile::from_rgba(self.surface.pixels())
    }
}
