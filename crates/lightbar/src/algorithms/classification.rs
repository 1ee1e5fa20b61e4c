//! Geometric filtering of traced contours into accepted candidate regions.

use tracing::{debug, info};

use crate::config::AcceptanceThresholds;
use crate::error::Result;
use crate::traits::RegionFilter;
use crate::types::{CandidateRegion, Contour};

/// Applies the light-bar acceptance rules from [`AcceptanceThresholds`] to
/// each contour independently. Rejected contours are dropped, never errors;
/// degenerate contours are rejected automatically.
#[derive(Debug, Clone, Default)]
pub struct GeometricClassifier {
    pub thresholds: AcceptanceThresholds,
}

impl GeometricClassifier {
    pub fn new(thresholds: AcceptanceThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Evaluate a single contour. `None` means rejected.
    pub fn evaluate(&self, contour: &Contour) -> Option<CandidateRegion> {
        if contour.is_degenerate() {
            return None;
        }
        let bounding_box = contour.bounding_box()?;
        if bounding_box.width == 0 {
            return None;
        }

        let area = contour.area();
        let aspect_ratio = bounding_box.aspect_ratio();
        let t = &self.thresholds;

        let accepted = area > t.min_area
            && area < t.max_area
            && aspect_ratio > t.min_aspect_ratio
            && aspect_ratio < t.max_aspect_ratio
            && bounding_box.width > t.min_width
            && bounding_box.height > t.min_height;

        accepted.then_some(CandidateRegion { bounding_box, area, aspect_ratio })
    }
}

impl RegionFilter for GeometricClassifier {
    fn filter(
        &self,
        contours: &[Contour],
        raster_extent: (u32, u32),
    ) -> Result<Vec<CandidateRegion>> {
        self.thresholds.validate()?;

        let mut accepted = Vec::new();
        for contour in contours {
            match self.evaluate(contour) {
                Some(region) => {
                    region
                        .bounding_box
                        .ensure_within(raster_extent.0, raster_extent.1)?;
                    info!(
                        "accepted light-bar candidate {}: area={:.1} aspect={:.2} at ({}, {})",
                        accepted.len() + 1,
                        region.area,
                        region.aspect_ratio,
                        region.bounding_box.x,
                        region.bounding_box.y,
                    );
                    accepted.push(region);
                }
                None => debug!(points = contour.points.len(), "rejected contour"),
            }
        }
        Ok(accepted)
    }
}
