//! Outer-boundary extraction from the cleaned mask.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::algorithms::colorspace::ensure_not_empty;
use crate::error::Result;
use crate::traits::ContourTracer;
use crate::types::Contour;

/// Boundary tracer backed by imageproc's Suzuki-Abe implementation.
///
/// Connected components are 8-connected and only outer borders are kept;
/// hole boundaries inside a blob are discarded. The underlying scan is
/// row-major, so contour order is stable for identical masks.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourTracer;

impl ContourTracer for ImageprocContourTracer {
    fn trace(&self, mask: &GrayImage) -> Result<Vec<Contour>> {
        ensure_not_empty("mask", mask.width(), mask.height())?;

        let contours = find_contours::<i32>(mask);
        Ok(contours
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer)
            .map(|contour| {
                Contour::new(contour.points.iter().map(|p| [p.x, p.y]).collect())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use image::Luma;

    fn fill(mask: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn test_two_blobs_yield_two_outer_contours() {
        let mut mask = GrayImage::new(40, 20);
        fill(&mut mask, 2, 2, 5, 10);
        fill(&mut mask, 20, 5, 8, 8);

        let contours = ImageprocContourTracer.trace(&mask).unwrap();
        assert_eq!(contours.len(), 2);

        // Row-major scan finds the upper-left blob first.
        let first = contours[0].bounding_box().unwrap();
        assert_eq!((first.x, first.y), (2, 2));
        assert_eq!((first.width, first.height), (5, 10));
    }

    #[test]
    fn test_hole_boundaries_are_excluded() {
        let mut mask = GrayImage::new(20, 20);
        fill(&mut mask, 2, 2, 12, 12);
        // Carve a 4x4 hole; its inner border must not be reported.
        for y in 6..10 {
            for x in 6..10 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }

        let contours = ImageprocContourTracer.trace(&mask).unwrap();
        assert_eq!(contours.len(), 1);
        let bb = contours[0].bounding_box().unwrap();
        assert_eq!((bb.width, bb.height), (12, 12));
    }

    #[test]
    fn test_blank_mask_yields_no_contours() {
        let contours = ImageprocContourTracer.trace(&GrayImage::new(10, 10)).unwrap();
        assert!(contours.is_empty());
    }

    #[test]
    fn test_trace_is_stable_across_runs() {
        let mut mask = GrayImage::new(30, 30);
        fill(&mut mask, 1, 1, 4, 12);
        fill(&mut mask, 10, 3, 6, 6);
        fill(&mut mask, 20, 15, 5, 11);

        let tracer = ImageprocContourTracer;
        assert_eq!(tracer.trace(&mask).unwrap(), tracer.trace(&mask).unwrap());
    }

    #[test]
    fn test_empty_mask_is_rejected() {
        assert!(matches!(
            ImageprocContourTracer.trace(&GrayImage::new(5, 0)),
            Err(DetectError::EmptyInput { .. })
        ));
    }
}
