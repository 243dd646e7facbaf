//! Compositing modes for combining new paint with existing pixel content.
//!
//! Used by the brush and the drawing engine: the pen paints with
//! [`CompositeMode::SourceOver`], the eraser cuts alpha with
//! [`CompositeMode::DestinationOut`].

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Rule for combining a source pixel with the destination already on the
/// surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// Normal painting — source blended over destination by its alpha.
    #[default]
    SourceOver,
    /// Destructive erasing — destination alpha reduced by source alpha,
    /// revealing whatever lies beneath the surface. Color is untouched.
    DestinationOut,
}

impl CompositeMode {
    /// Apply this mode to one pixel pair.
    #[inline]
    pub fn apply(self, dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
        match self {
            CompositeMode::SourceOver => source_over(dst, src),
            CompositeMode::DestinationOut => destination_out(dst, src),
        }
    }
}

/// Porter-Duff source-over in straight (non-premultiplied) u8 channels.
#[inline]
fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let c = (s * sa + d * da * (1.0 - sa)) / out_a;
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Porter-Duff destination-out: keep destination color, scale its alpha by
/// the inverse of the source alpha.
#[inline]
fn destination_out(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let out_a = (dst[3] as f32 / 255.0) * (1.0 - sa);
    Rgba([
        dst[0],
        dst[1],
        dst[2],
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
