//! Round-cap brush stamping.
//!
//! Strokes are rendered as stamped geometry: a filled disc at the stroke
//! start, then one capsule (segment with round caps) per pointer move.
//! Coverage is a hard in/out test against the capsule — anti-aliasing is
//! deliberately absent so the mask extractor sees clean paint signatures.

use image::Rgba;

use super::RasterSurface;
use super::composite::CompositeMode;

/// Stamp a filled disc centered at (cx, cy).
pub fn stamp_disc(
    surface: &mut RasterSurface,
    cx: f32,
    cy: f32,
    radius: f32,
    color: Rgba<u8>,
    mode: CompositeMode,
) {
    if radius <= 0.0 {
        return;
    }
    let (x0, y0, x1, y1) = clip_bounds(
        surface,
        cx - radius,
        cy - radius,
        cx + radius,
        cy + radius,
    );
    let r2 = radius * radius;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                surface.composite_pixel(x, y, color, mode);
            }
        }
    }
}

/// Stamp a line segment with round caps (a capsule) from `from` to `to`,
/// `width` pixels thick.
pub fn stamp_segment(
    surface: &mut RasterSurface,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
    mode: CompositeMode,
) {
    let half = width / 2.0;
    if half <= 0.0 {
        return;
    }
    let min_x = from.0.min(to.0) - half;
    let min_y = from.1.min(to.1) - half;
    let max_x = from.0.max(to.0) + half;
    let max_y = from.1.max(to.1) + half;
    let (x0, y0, x1, y1) = clip_bounds(surface, min_x, min_y, max_x, max_y);
    let half2 = half * half;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            if dist_sq_to_segment(p, from, to) <= half2 {
                surface.composite_pixel(x, y, color, mode);
            }
        }
    }
}

/// Clip a float bounding box to surface pixel coordinates.
fn clip_bounds(
    surface: &RasterSurface,
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
) -> (u32, u32, u32, u32) {
    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().max(0.0) as u32).min(surface.width());
    let y1 = (max_y.ceil().max(0.0) as u32).min(surface.height());
    (x0, y0, x1, y1)
}

/// Squared distance from point `p` to the segment `a`–`b`.
#[inline]
fn dist_sq_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let ab = (b.0 - a.0, b.1 - a.1);
    let ap = (p.0 - a.0, p.1 - a.1);
    let len2 = ab.0 * ab.0 + ab.1 * ab.1;
    let t = if len2 > 0.0 {
        ((ap.0 * ab.0 + ap.1 * ab.1) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = p.0 - (a.0 + t * ab.0);
    let dy = p.1 - (a.1 + t * ab.1);
    dx * dx + dy * dy
}
