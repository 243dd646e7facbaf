//! Undo history for a drawing surface.
//!
//! Full-surface snapshots, append-only except for pop-on-undo. The stack
//! is never empty: the bottom entry is always the seed painted by the last
//! reset (background only, no user strokes), and undo refuses to pop it.

use crate::raster::RasterSurface;

/// An ordered stack of full-surface snapshots.
#[derive(Debug, Clone)]
pub(crate) struct HistoryStack {
    snapshots: Vec<RasterSurface>,
}

impl HistoryStack {
    /// Start a stack with its seed snapshot.
    pub fn new(seed: RasterSurface) -> Self {
        Self {
            snapshots: vec![seed],
        }
    }

    /// Throw away everything and re-seed. Called on every resize,
    /// background change, or explicit clear.
    pub fn reset(&mut self, seed: RasterSurface) {
        self.snapshots.clear();
        self.snapshots.push(seed);
    }

    /// Record a completed stroke.
    pub fn push(&mut self, snapshot: RasterSurface) {
        self.snapshots.push(snapshot);
    }

    /// Pop the latest snapshot and return the one beneath it, or `None`
    /// when only the seed remains.
    pub fn undo(&mut self) -> Option<&RasterSurface> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        self.snapshots.pop();
        self.snapshots.last()
    }

    /// Number of snapshots currently held (>= 1).
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn snap(v: u8) -> RasterSurface {
        RasterSurface::new(2, 2, Rgba([v, v, v, 255])).unwrap()
    }

    #[test]
    fn test_seed_is_never_popped() {
        let mut h = HistoryStack::new(snap(0));
        assert!(h.undo().is_none());
        assert_eq!(h.depth(), 1);
    }

    #[test]
    fn test_undo_returns_prior_snapshot() {
        let mut h = HistoryStack::new(snap(0));
        h.push(snap(1));
        h.push(snap(2));
        assert_eq!(h.undo(), Some(&snap(1)));
        assert_eq!(h.undo(), Some(&snap(0)));
        assert!(h.undo().is_none());
    }

    #[test]
    fn test_reset_truncates_to_new_seed() {
        let mut h = HistoryStack::new(snap(0));
        h.push(snap(1));
        h.push(snap(2));
        h.reset(snap(9));
        assert_eq!(h.depth(), 1);
        assert!(h.undo().is_none());
    }
}
