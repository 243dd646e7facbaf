//! # Raster Surfaces
//!
//! An owned, mutable RGBA pixel buffer with explicit dimensions — the one
//! mutable type in the engine. Every surface has exactly one owner; the
//! drawing engine snapshots it for history, the mask extractor and outpaint
//! composer only ever read it or build fresh ones.
//!
//! ## Modules
//!
//! - [`composite`]: per-pixel compositing rules (paint vs. erase)
//! - [`brush`]: round-cap stroke stamping on top of a surface

pub mod brush;
pub mod composite;

use image::{Rgba, RgbaImage, imageops::FilterType};

use crate::error::CroquisError;
use composite::CompositeMode;

/// An owned 2D RGBA pixel grid.
///
/// Buffer dimensions always match the logical size; any size change means
/// building a new surface (prior pixel content does not survive a resize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Create a surface filled with a solid color.
    ///
    /// Zero dimensions are rejected up front.
    pub fn new(width: u32, height: u32, fill: Rgba<u8>) -> Result<Self, CroquisError> {
        if width == 0 || height == 0 {
            return Err(CroquisError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, fill),
        })
    }

    /// Take ownership of an existing pixel buffer.
    pub fn from_pixels(pixels: RgbaImage) -> Result<Self, CroquisError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(CroquisError::InvalidDimensions {
                width: pixels.width() as i64,
                height: pixels.height() as i64,
            });
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read a pixel. `None` outside the surface.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        Some(*self.pixels.get_pixel(x, y))
    }

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.pixels.width() && y < self.pixels.height() {
            self.pixels.put_pixel(x, y, color);
        }
    }

    /// Combine `src` into the pixel at (x, y) under the given compositing
    /// mode. Out-of-bounds is ignored.
    #[inline]
    pub fn composite_pixel(&mut self, x: u32, y: u32, src: Rgba<u8>, mode: CompositeMode) {
        if x < self.pixels.width() && y < self.pixels.height() {
            let dst = *self.pixels.get_pixel(x, y);
            self.pixels.put_pixel(x, y, mode.apply(dst, src));
        }
    }

    /// Flood the whole surface with a solid color.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
    }

    /// Composite an image onto the surface with "contain" scaling: scaled
    /// uniformly so it fits entirely inside the surface, centered, aspect
    /// ratio preserved.
    ///
    /// Scale factor is `min(surface_w / img_w, surface_h / img_h)`.
    pub fn composite_contain(&mut self, img: &RgbaImage) {
        let (sw, sh) = (self.pixels.width() as f32, self.pixels.height() as f32);
        let (iw, ih) = (img.width() as f32, img.height() as f32);
        if iw == 0.0 || ih == 0.0 {
            return;
        }
        let scale = (sw / iw).min(sh / ih);
        let target_w = ((iw * scale).round() as u32).max(1);
        let target_h = ((ih * scale).round() as u32).max(1);

        let scaled = image::imageops::resize(img, target_w, target_h, FilterType::Triangle);
        let shift_x = ((sw - target_w as f32) / 2.0).round() as i64;
        let shift_y = ((sh - target_h as f32) / 2.0).round() as i64;

        for (x, y, src) in scaled.enumerate_pixels() {
            let dx = shift_x + x as i64;
            let dy = shift_y + y as i64;
            if dx >= 0 && dy >= 0 {
                self.composite_pixel(dx as u32, dy as u32, *src, CompositeMode::SourceOver);
            }
        }
    }

    /// Borrow the underlying pixel buffer (for encoding or scanning).
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Give up ownership of the pixel buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}
