//! # Croquis - Raster Compositing & Masking Engine
//!
//! Croquis prepares the raster artifacts a sketch-guided image-generation
//! workflow hands to its generation service. It provides:
//!
//! - **Drawing surface**: freehand pen/eraser strokes over an optional
//!   background image, with resize-safe undo history
//! - **Mask extraction**: painted-overlay → strict binary inpaint mask
//! - **Outpaint composition**: pad an image to a target aspect ratio and
//!   build the matching border mask
//! - **Ratio resolution**: map arbitrary dimensions to the closest
//!   supported aspect ratio
//!
//! ## Quick Start
//!
//! ```
//! use croquis::drawing::{BrushConfig, DrawingSurface, Tool};
//! use croquis::outpaint;
//! use croquis::ratio::{AspectRatio, RatioTarget};
//!
//! // Sketch a guide: one green stroke, then hand the PNG to the service.
//! let mut surface = DrawingSurface::new(640, 480)?;
//! surface.set_brush(BrushConfig {
//!     tool: Tool::Pen,
//!     color: [0, 255, 0, 255],
//!     width: 6.0,
//! });
//! surface.begin_stroke(100.0, 100.0);
//! surface.extend_stroke(300.0, 200.0);
//! let guide = surface.end_stroke()?.expect("stroke was in flight");
//!
//! // Pad the result to 16:9 for outpainting.
//! let artifacts = outpaint::compose(
//!     &guide,
//!     RatioTarget::Ratio(AspectRatio::SixteenNine),
//! )?;
//! let _payload = (artifacts.padded, artifacts.mask.to_image_file()?);
//! # Ok::<(), croquis::error::CroquisError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`drawing`] | Freehand drawing surface with undo history |
//! | [`mask`] | Binary mask extraction from painted overlays |
//! | [`outpaint`] | Padded-canvas and border-mask composition |
//! | [`ratio`] | Supported aspect ratios and the closest-ratio resolver |
//! | [`raster`] | Owned RGBA surfaces, compositing modes, brush stamping |
//! | [`image_file`] | The `ImageFile` exchange artifact (bytes + mime type) |
//! | [`error`] | Error types |
//!
//! Every boundary speaks [`image_file::ImageFile`]: PNG, JPEG or WebP on
//! ingest, always PNG on emit.

pub mod drawing;
pub mod error;
pub mod image_file;
pub mod mask;
pub mod outpaint;
pub mod raster;
pub mod ratio;

// Re-exports for convenience
pub use drawing::DrawingSurface;
pub use error::CroquisError;
pub use image_file::ImageFile;
pub use mask::{Mask, MaskKey};
pub use ratio::AspectRatio;
