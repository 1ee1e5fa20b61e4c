//! Drawing accepted regions back onto a copy of the source raster.

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::algorithms::colorspace::ensure_not_empty;
use crate::error::Result;
use crate::traits::RegionAnnotator;
use crate::types::CandidateRegion;

const FONT_BYTES: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Outlines each accepted region with a 2 px box and labels it with its
/// area and aspect ratio (`A:<area> R:<ratio>`), drawn just above the box
/// and clamped into the raster. Regions are drawn in input order;
/// overlapping labels are not deconflicted.
pub struct BoxAnnotator {
    pub color: Rgb<u8>,
    pub label_scale: f32,
    font: FontRef<'static>,
}

impl Default for BoxAnnotator {
    fn default() -> Self {
        // The font ships inside the crate; parsing only fails if the asset
        // itself is corrupt.
        let font = FontRef::try_from_slice(FONT_BYTES).expect("bundled font parses");
        Self {
            color: Rgb([0, 255, 0]),
            label_scale: 12.0,
            font,
        }
    }
}

impl BoxAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Rgb<u8>) -> Self {
        self.color = color;
        self
    }
}

impl RegionAnnotator for BoxAnnotator {
    fn annotate(&self, base: &RgbImage, regions: &[CandidateRegion]) -> Result<RgbImage> {
        ensure_not_empty("raster", base.width(), base.height())?;

        let mut annotated = base.clone();
        let scale = PxScale::from(self.label_scale);

        for region in regions {
            let bb = region.bounding_box;
            bb.ensure_within(base.width(), base.height())?;

            draw_hollow_rect_mut(
                &mut annotated,
                Rect::at(bb.x, bb.y).of_size(bb.width, bb.height),
                self.color,
            );
            // Second ring one pixel in for a 2 px outline.
            if bb.width > 2 && bb.height > 2 {
                draw_hollow_rect_mut(
                    &mut annotated,
                    Rect::at(bb.x + 1, bb.y + 1).of_size(bb.width - 2, bb.height - 2),
                    self.color,
                );
            }

            let label = format!("A:{} R:{:.2}", region.area as i64, region.aspect_ratio);
            let label_y = (bb.y - self.label_scale as i32 - 5).max(0);
            draw_text_mut(
                &mut annotated,
                self.color,
                bb.x.max(0),
                label_y,
                scale,
                &self.font,
                &label,
            );
        }
        Ok(annotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use crate::types::BoundingBox;

    fn region(x: i32, y: i32, width: u32, height: u32) -> CandidateRegion {
        CandidateRegion {
            bounding_box: BoundingBox { x, y, width, height },
            area: 120.0,
            aspect_ratio: height as f64 / width as f64,
        }
    }

    #[test]
    fn test_annotate_preserves_dimensions_and_base() {
        let base = RgbImage::new(60, 60);
        let annotated = BoxAnnotator::new()
            .annotate(&base, &[region(10, 20, 6, 20)])
            .unwrap();

        assert_eq!(annotated.dimensions(), (60, 60));
        // Far corner untouched.
        assert_eq!(annotated.get_pixel(59, 59).0, [0, 0, 0]);
        // Box outline is drawn in the annotator colour, two pixels deep.
        assert_eq!(annotated.get_pixel(10, 20).0, [0, 255, 0]);
        assert_eq!(annotated.get_pixel(11, 21).0, [0, 255, 0]);
        // Region interior stays untouched.
        assert_eq!(annotated.get_pixel(13, 30).0, [0, 0, 0]);
    }

    #[test]
    fn test_annotate_does_not_mutate_input() {
        let base = RgbImage::new(40, 40);
        let _ = BoxAnnotator::new().annotate(&base, &[region(5, 15, 6, 20)]).unwrap();
        assert!(base.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_label_is_clamped_into_raster() {
        // Region at the top edge: the label row would be negative.
        let base = RgbImage::new(40, 40);
        let annotated = BoxAnnotator::new().annotate(&base, &[region(2, 0, 6, 20)]).unwrap();
        assert_eq!(annotated.dimensions(), (40, 40));
    }

    #[test]
    fn test_escaping_region_is_rejected() {
        let base = RgbImage::new(30, 30);
        assert!(matches!(
            BoxAnnotator::new().annotate(&base, &[region(25, 5, 10, 20)]),
            Err(DetectError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_no_regions_is_a_plain_copy() {
        let mut base = RgbImage::new(8, 8);
        base.put_pixel(3, 3, Rgb([9, 8, 7]));
        let annotated = BoxAnnotator::new().annotate(&base, &[]).unwrap();
        assert_eq!(annotated, base);
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        assert!(matches!(
            BoxAnnotator::new().annotate(&RgbImage::new(0, 0), &[]),
            Err(DetectError::EmptyInput { .. })
        ));
    }
}
