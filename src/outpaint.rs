//! # Outpaint Composition
//!
//! Pads a source image to a target aspect ratio and produces the matching
//! border mask. The padded canvas always fully contains the original —
//! only the shorter dimension grows, the original is centered, and the
//! letterbox is filled with neutral black. The mask marks the letterbox
//! (plus a thin seam overlap into the original) as the region to generate.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::CroquisError;
use crate::image_file::ImageFile;
use crate::mask::Mask;
use crate::raster::RasterSurface;
use crate::raster::composite::CompositeMode;
use crate::ratio::{AspectRatio, RatioTarget};

/// Seam overlap in pixels: the "preserve" rectangle is shrunk by this much
/// on every side so regenerated content blends over the boundary instead
/// of meeting it at a hard edge.
pub const SEAM_INSET: u32 = 4;

/// Letterbox fill for the padded canvas.
const PAD_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Placement of an original image inside a larger letterboxed canvas.
///
/// Computed once per outpaint request; immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddedCanvasGeometry {
    pub target_width: u32,
    pub target_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// Everything the generation-service collaborator needs for one outpaint
/// request.
#[derive(Debug, Clone)]
pub struct OutpaintArtifacts {
    /// The original centered on a black canvas at the target ratio (PNG).
    pub padded: ImageFile,
    /// White = generate, black = preserve, at the padded dimensions.
    pub mask: Mask,
    /// The supported ratio the request should declare.
    pub resolved_ratio: AspectRatio,
    /// Where the original sits inside the padded canvas.
    pub geometry: PaddedCanvasGeometry,
}

/// Compute the padded canvas size and centering offsets for a source of
/// `width`×`height` and a target width/height quotient.
///
/// If the source is wider than the target ratio its width is kept and the
/// height grows; otherwise the height is kept and the width grows. Either
/// way the canvas contains the original without cropping.
pub fn geometry(
    width: u32,
    height: u32,
    target_ratio: f64,
) -> Result<PaddedCanvasGeometry, CroquisError> {
    if width == 0 || height == 0 {
        return Err(CroquisError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    let current_ratio = width as f64 / height as f64;
    let (target_width, target_height) = if current_ratio > target_ratio {
        (width, (width as f64 / target_ratio).round() as u32)
    } else {
        ((height as f64 * target_ratio).round() as u32, height)
    };
    Ok(PaddedCanvasGeometry {
        target_width,
        target_height,
        offset_x: ((target_width - width) as f64 / 2.0).round() as u32,
        offset_y: ((target_height - height) as f64 / 2.0).round() as u32,
    })
}

/// Pad `original` to `target` and build the companion border mask.
///
/// A decode failure on `original` is fatal to the request; nothing partial
/// is returned.
pub fn compose(
    original: &ImageFile,
    target: RatioTarget,
) -> Result<OutpaintArtifacts, CroquisError> {
    let pixels = original.decode()?;
    let (w, h) = pixels.dimensions();

    let resolved_ratio = match target {
        RatioTarget::Ratio(r) => r,
        RatioTarget::MatchSource => AspectRatio::closest(w, h)?,
    };
    let geo = geometry(w, h, resolved_ratio.value())?;
    // The padding rule keeps the long axis, so the canvas can never be
    // smaller than the original in either axis.
    debug_assert!(geo.target_width >= w && geo.target_height >= h);

    // Padded canvas: black letterbox, original centered on top.
    let mut padded = RasterSurface::new(geo.target_width, geo.target_height, PAD_COLOR)?;
    for (x, y, src) in pixels.enumerate_pixels() {
        padded.composite_pixel(
            geo.offset_x + x,
            geo.offset_y + y,
            *src,
            CompositeMode::SourceOver,
        );
    }

    // Border mask: all-generate, minus the original's footprint shrunk by
    // the seam inset (clamped to a quarter of each original dimension).
    let inset = SEAM_INSET.min(w / 4).min(h / 4);
    let mut mask = RasterSurface::new(geo.target_width, geo.target_height, Mask::FILL)?;
    let keep_w = w.saturating_sub(2 * inset);
    let keep_h = h.saturating_sub(2 * inset);
    for y in 0..keep_h {
        for x in 0..keep_w {
            mask.set_pixel(
                geo.offset_x + inset + x,
                geo.offset_y + inset + y,
                Mask::PRESERVE,
            );
        }
    }

    Ok(OutpaintArtifacts {
        padded: ImageFile::from_rgba(padded.pixels())?,
        mask: Mask::from_surface(mask),
        resolved_ratio,
        geometry: geo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn solid_png(w: u32, h: u32, color: Rgba<u8>) -> ImageFile {
        ImageFile::from_rgba(&RgbaImage::from_pixel(w, h, color)).unwrap()
    }

    #[test]
    fn test_geometry_square_to_wide() {
        // 100x100 into 16:9: height kept, width grows to round(100 * 16/9).
        let geo = geometry(100, 100, AspectRatio::SixteenNine.value()).unwrap();
        assert_eq!(geo.target_width, 178);
        assert_eq!(geo.target_height, 100);
        assert_eq!(geo.offset_x, 39);
        assert_eq!(geo.offset_y, 0);
    }

    #[test]
    fn test_geometry_wide_to_square() {
        // Wider than target: width kept, height grows.
        let geo = geometry(200, 100, AspectRatio::Square.value()).unwrap();
        assert_eq!(geo.target_width, 200);
        assert_eq!(geo.target_height, 200);
        assert_eq!(geo.offset_x, 0);
        assert_eq!(geo.offset_y, 50);
    }

    #[test]
    fn test_geometry_never_shrinks_the_original() {
        for ratio in AspectRatio::ALL {
            for (w, h) in [(100, 100), (640, 480), (33, 777), (1920, 1080)] {
                let geo = geometry(w, h, ratio.value()).unwrap();
                assert!(geo.target_width >= w, "{ratio} {w}x{h}");
                assert!(geo.target_height >= h, "{ratio} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_geometry_rejects_zero() {
        assert!(matches!(
            geometry(0, 5, 1.0),
            Err(CroquisError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_compose_pads_and_masks_square_to_wide() {
        let red = Rgba([200, 0, 0, 255]);
        let artifacts = compose(
            &solid_png(100, 100, red),
            RatioTarget::Ratio(AspectRatio::SixteenNine),
        )
        .unwrap();

        assert_eq!(artifacts.resolved_ratio, AspectRatio::SixteenNine);
        assert_eq!(artifacts.geometry.target_width, 178);
        assert_eq!(artifacts.geometry.offset_x, 39);

        let padded = artifacts.padded.decode().unwrap();
        assert_eq!(padded.dimensions(), (178, 100));
        // Letterbox is black, original region carries the source color.
        assert_eq!(padded.get_pixel(0, 50), &Rgba([0, 0, 0, 255]));
        assert_eq!(padded.get_pixel(89, 50), &red);

        let mask = artifacts.mask.surface();
        assert_eq!((mask.width(), mask.height()), (178, 100));
        // Letterbox: generate
        assert_eq!(mask.get_pixel(0, 50), Some(Mask::FILL));
        // Seam band inside the original's footprint: still generate
        assert_eq!(mask.get_pixel(39 + 2, 50), Some(Mask::FILL));
        // Deep inside the original: preserve
        assert_eq!(mask.get_pixel(89, 50), Some(Mask::PRESERVE));
        assert_eq!(mask.get_pixel(39 + 4, 4), Some(Mask::PRESERVE));
    }

    #[test]
    fn test_seam_inset_clamps_on_tiny_sources() {
        // 8x8 source: inset clamps to 8/4 = 2.
        let artifacts = compose(
            &solid_png(8, 8, Rgba([9, 9, 9, 255])),
            RatioTarget::Ratio(AspectRatio::Square),
        )
        .unwrap();
        let mask = artifacts.mask.surface();
        assert_eq!(mask.get_pixel(1, 1), Some(Mask::FILL));
        assert_eq!(mask.get_pixel(2, 2), Some(Mask::PRESERVE));
        assert_eq!(mask.get_pixel(5, 5), Some(Mask::PRESERVE));
        assert_eq!(mask.get_pixel(6, 6), Some(Mask::FILL));
    }

    #[test]
    fn test_match_source_resolves_via_closest() {
        let artifacts = compose(
            &solid_png(1920, 1080, Rgba([1, 2, 3, 255])),
            RatioTarget::MatchSource,
        )
        .unwrap();
        assert_eq!(artifacts.resolved_ratio, AspectRatio::SixteenNine);
        // 1920x1080 is already 16:9: nothing to pad.
        assert_eq!(artifacts.geometry.target_width, 1920);
        assert_eq!(artifacts.geometry.target_height, 1080);
        assert_eq!(artifacts.geometry.offset_x, 0);
        assert_eq!(artifacts.geometry.offset_y, 0);
    }

    #[test]
    fn test_compose_fails_hard_on_corrupt_input() {
        let bad = ImageFile::new(vec![1, 2, 3], crate::image_file::MimeType::Png);
        assert!(matches!(
            compose(&bad, RatioTarget::Ratio(AspectRatio::Square)),
            Err(CroquisError::Decode(_))
        ));
    }
}
