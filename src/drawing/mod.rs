//! # Freehand Drawing Engine
//!
//! A stateful drawing surface for sketching pose/layout guides: strokes
//! and erasing over an optional background image, full-surface undo
//! history, and PNG emission after every completed stroke, undo, or reset.
//!
//! ## Lifecycle
//!
//! The surface moves through `Ready → Drawing → Ready` as strokes begin
//! and end. A resize, background change, or explicit clear takes the reset
//! path: repaint the background (solid fill, then the background image
//! composited with "contain" scaling), discard any stroke in flight, and
//! truncate the undo history to that freshly painted seed. Repaint and
//! history reset happen together inside one `&mut self` call — no caller
//! can observe one without the other.
//!
//! The raw surface and history are never exposed; collaborators drive the
//! engine through stroke events, [`DrawingSurface::undo`] and
//! [`DrawingSurface::clear`], and receive encoded [`ImageFile`]s back.

mod history;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::CroquisError;
use crate::image_file::ImageFile;
use crate::raster::composite::CompositeMode;
use crate::raster::{RasterSurface, brush};
use history::HistoryStack;

/// Default surface background.
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Active drawing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Opaque strokes in the brush color, composited normally.
    #[default]
    Pen,
    /// Destructive strokes that cut alpha, revealing whatever lies beneath.
    Eraser,
}

/// Tool, color and width for subsequent strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    pub tool: Tool,
    /// Stroke color (RGBA). Ignored by the eraser.
    pub color: [u8; 4],
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: [0, 0, 0, 255],
            width: 4.0,
        }
    }
}

/// An in-flight stroke: everything between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy)]
struct Stroke {
    last: (f32, f32),
}

/// Stateful freehand-drawing surface with background compositing and
/// resize-safe undo history.
#[derive(Debug)]
pub struct DrawingSurface {
    surface: RasterSurface,
    history: HistoryStack,
    background: Option<image::RgbaImage>,
    background_color: Rgba<u8>,
    brush: BrushConfig,
    stroke: Option<Stroke>,
}

impl DrawingSurface {
    /// Create a surface of the given size with the default white
    /// background and no background image. The freshly painted state seeds
    /// the undo history.
    pub fn new(width: u32, height: u32) -> Result<Self, CroquisError> {
        Self::with_background_color(width, height, DEFAULT_BACKGROUND)
    }

    /// As [`DrawingSurface::new`] with an explicit background fill color.
    pub fn with_background_color(
        width: u32,
        height: u32,
        background_color: Rgba<u8>,
    ) -> Result<Self, CroquisError> {
        let surface = RasterSurface::new(width, height, background_color)?;
        let history = HistoryStack::new(surface.clone());
        Ok(Self {
            surface,
            history,
            background: None,
            background_color,
            brush: BrushConfig::default(),
            stroke: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Tool configuration for subsequent strokes. Takes effect at the next
    /// stamp; a stroke already in flight keeps drawing with whatever each
    /// pointer event sees.
    pub fn set_brush(&mut self, brush: BrushConfig) {
        self.brush = brush;
    }

    pub fn brush(&self) -> BrushConfig {
        self.brush
    }

    /// Snapshots currently in the undo history (>= 1; the seed counts).
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Whether a stroke is currently in flight.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Encode the current surface content as a PNG [`ImageFile`].
    pub fn emit(&self) -> Result<ImageFile, CroquisError> {
        ImageFile::from_rgba(self.surface.pixels())
    }

    /// Set or remove the background image, then take the reset path.
    ///
    /// The image is decoded before any state changes: a decode failure
    /// leaves surface, history and background untouched.
    pub fn set_background(
        &mut self,
        background: Option<&ImageFile>,
    ) -> Result<ImageFile, CroquisError> {
        let decoded = match background {
            Some(file) => Some(file.decode()?),
            None => None,
        };
        self.background = decoded;
        self.repaint()
    }

    /// Notify the surface that its logical size changed.
    ///
    /// A genuine size change discards any in-flight stroke and the entire
    /// undo history, repaints the background at the new size, and seeds a
    /// fresh history. Same-size notifications re-emit the current content
    /// without resetting anything.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<ImageFile, CroquisError> {
        if width == self.surface.width() && height == self.surface.height() {
            return self.emit();
        }
        self.surface = RasterSurface::new(width, height, self.background_color)?;
        self.repaint()
    }

    /// Repaint background-only content and truncate the history to that
    /// single seed snapshot. Equivalent to forcing the reset path.
    pub fn clear(&mut self) -> Result<ImageFile, CroquisError> {
        self.repaint()
    }

    /// Pointer-down: begin a stroke at (x, y) and stamp its starting dot.
    ///
    /// Ignored if a stroke is already in flight — strokes are serialized
    /// by pointer event order, so a second pointer-down without a
    /// pointer-up is a spurious event.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        if self.stroke.is_some() {
            return;
        }
        let (color, mode) = self.stamp_style();
        brush::stamp_disc(&mut self.surface, x, y, self.brush.width / 2.0, color, mode);
        self.stroke = Some(Stroke { last: (x, y) });
    }

    /// Pointer-move: extend the in-flight stroke to (x, y) with a
    /// round-cap segment. No-op when not drawing.
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        let Some(stroke) = self.stroke else {
            return;
        };
        let (color, mode) = self.stamp_style();
        brush::stamp_segment(
            &mut self.surface,
            stroke.last,
            (x, y),
            self.brush.width,
            color,
            mode,
        );
        self.stroke = Some(Stroke { last: (x, y) });
    }

    /// Pointer-up or pointer-leave: finalize the stroke, push the
    /// resulting snapshot onto the history, and emit the encoded state.
    ///
    /// Returns `Ok(None)` when no stroke was in flight.
    pub fn end_stroke(&mut self) -> Result<Option<ImageFile>, CroquisError> {
        if self.stroke.take().is_none() {
            return Ok(None);
        }
        self.history.push(self.surface.clone());
        self.emit().map(Some)
    }

    /// Pop the most recent stroke off the history and restore the prior
    /// snapshot, re-emitting the encoded state.
    ///
    /// Returns `Ok(None)` when only the seed snapshot remains — the
    /// background-only state from the last reset is never undone.
    pub fn undo(&mut self) -> Result<Option<ImageFile>, CroquisError> {
        let Some(prior) = self.history.undo() else {
            return Ok(None);
        };
        self.surface = prior.clone();
        self.emit().map(Some)
    }

    /// The reset path: fill with the background color, composite the
    /// background image (contain scaling, centered), drop any in-flight
    /// stroke, re-seed the history, and emit.
    fn repaint(&mut self) -> Result<ImageFile, CroquisError> {
        self.stroke = None;
        self.surface.fill(self.background_color);
        if let Some(bg) = &self.background {
            self.surface.composite_contain(bg);
        }
        self.history.reset(self.surface.clone());
        self.emit()
    }

    /// Color and compositing mode for the active tool.
    fn stamp_style(&self) -> (Rgba<u8>, CompositeMode) {
        match self.brush.tool {
            Tool::Pen => (Rgba(self.brush.color), CompositeMode::SourceOver),
            // Color is irrelevant under destination-out; only alpha cuts.
            Tool::Eraser => (Rgba([255, 255, 255, 255]), CompositeMode::DestinationOut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn pen(width: f32) -> BrushConfig {
        BrushConfig {
            tool: Tool::Pen,
            color: GREEN,
            width,
        }
    }

    fn draw_dot(surface: &mut DrawingSurface, x: f32, y: f32) -> ImageFile {
        surface.begin_stroke(x, y);
        surface.end_stroke().unwrap().expect("stroke was in flight")
    }

    #[test]
    fn test_new_seeds_history_with_background_only() {
        let s = DrawingSurface::new(16, 16).unwrap();
        assert_eq!(s.history_depth(), 1);
        assert!(!s.is_drawing());
    }

    #[test]
    fn test_stroke_paints_and_pushes_history() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(6.0));
        s.begin_stroke(8.0, 16.0);
        s.extend_stroke(24.0, 16.0);
        let emitted = s.end_stroke().unwrap().unwrap();
        assert_eq!(s.history_depth(), 2);

        let pixels = emitted.decode().unwrap();
        assert_eq!(pixels.get_pixel(16, 16), &image::Rgba(GREEN));
        assert_eq!(pixels.get_pixel(16, 2), &image::Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_point_stroke_leaves_a_dot() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(8.0));
        let emitted = draw_dot(&mut s, 16.0, 16.0);
        let pixels = emitted.decode().unwrap();
        assert_eq!(pixels.get_pixel(16, 16), &image::Rgba(GREEN));
    }

    #[test]
    fn test_eraser_cuts_alpha() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(8.0));
        draw_dot(&mut s, 16.0, 16.0);

        s.set_brush(BrushConfig {
            tool: Tool::Eraser,
            width: 12.0,
            ..BrushConfig::default()
        });
        let emitted = draw_dot(&mut s, 16.0, 16.0);
        let pixels = emitted.decode().unwrap();
        assert_eq!(pixels.get_pixel(16, 16)[3], 0);
    }

    #[test]
    fn test_undo_restores_and_respects_seed() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        let seed = s.emit().unwrap();
        s.set_brush(pen(6.0));
        draw_dot(&mut s, 10.0, 10.0);
        draw_dot(&mut s, 20.0, 20.0);
        assert_eq!(s.history_depth(), 3);

        assert!(s.undo().unwrap().is_some());
        let restored = s.undo().unwrap().unwrap();
        assert_eq!(restored, seed);
        // Seed is never poppable
        assert!(s.undo().unwrap().is_none());
        assert_eq!(s.history_depth(), 1);
    }

    #[test]
    fn test_resize_discards_history_and_in_flight_stroke() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(6.0));
        draw_dot(&mut s, 10.0, 10.0);
        s.begin_stroke(20.0, 20.0);
        assert!(s.is_drawing());

        s.resize(64, 48).unwrap();
        assert!(!s.is_drawing());
        assert_eq!(s.history_depth(), 1);
        assert_eq!((s.width(), s.height()), (64, 48));
        // The discarded stroke never lands in history
        assert!(s.end_stroke().unwrap().is_none());
    }

    #[test]
    fn test_same_size_resize_is_not_a_reset() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(6.0));
        let after_stroke = draw_dot(&mut s, 10.0, 10.0);
        let emitted = s.resize(32, 32).unwrap();
        assert_eq!(emitted, after_stroke);
        assert_eq!(s.history_depth(), 2);
    }

    #[test]
    fn test_clear_repaints_background_only() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        let seed = s.emit().unwrap();
        s.set_brush(pen(6.0));
        draw_dot(&mut s, 10.0, 10.0);
        let cleared = s.clear().unwrap();
        assert_eq!(cleared, seed);
        assert_eq!(s.history_depth(), 1);
    }

    #[test]
    fn test_background_image_is_contained_and_centered() {
        let bg = ImageFile::from_rgba(&image::RgbaImage::from_pixel(
            10,
            5,
            image::Rgba([255, 0, 0, 255]),
        ))
        .unwrap();
        let mut s = DrawingSurface::new(100, 100).unwrap();
        let emitted = s.set_background(Some(&bg)).unwrap();
        let pixels = emitted.decode().unwrap();
        // Image scaled 10x to 100x50, centered vertically
        assert_eq!(pixels.get_pixel(50, 50), &image::Rgba([255, 0, 0, 255]));
        assert_eq!(pixels.get_pixel(50, 10), &image::Rgba([255, 255, 255, 255]));
        assert_eq!(s.history_depth(), 1);
    }

    #[test]
    fn test_background_decode_failure_leaves_state_unchanged() {
        let mut s = DrawingSurface::new(32, 32).unwrap();
        s.set_brush(pen(6.0));
        draw_dot(&mut s, 10.0, 10.0);
        let before = s.emit().unwrap();

        let bad = ImageFile::new(vec![0xFF], crate::image_file::MimeType::Png);
        assert!(s.set_background(Some(&bad)).is_err());
        assert_eq!(s.emit().unwrap(), before);
        assert_eq!(s.history_depth(), 2);
    }
}
