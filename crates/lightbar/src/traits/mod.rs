use image::{GrayImage, RgbImage};

use crate::algorithms::colorspace::HsvImage;
use crate::error::Result;
use crate::types::{CandidateRegion, Contour};

/// Trait for colour-raster preprocessing (noise suppression).
pub trait ImagePreprocessor: Send + Sync {
    /// Produce a new raster with identical dimensions.
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage>;
}

/// Trait for turning an HSV raster into a binary foreground mask.
pub trait MaskSegmenter: Send + Sync {
    fn segment(&self, hsv: &HsvImage) -> Result<GrayImage>;
}

/// Trait for mask cleanup algorithms (artifact removal, gap filling).
pub trait MaskCleaner: Send + Sync {
    fn clean(&self, mask: &GrayImage) -> Result<GrayImage>;
}

/// Trait for boundary extraction from a binary mask.
pub trait ContourTracer: Send + Sync {
    /// Outer boundaries of connected foreground regions, in an order that is
    /// stable for identical input.
    fn trace(&self, mask: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for filtering contours down to accepted candidate regions.
pub trait RegionFilter: Send + Sync {
    /// `raster_extent` is the source raster's (width, height); every
    /// returned region must fit inside it.
    fn filter(&self, contours: &[Contour], raster_extent: (u32, u32))
        -> Result<Vec<CandidateRegion>>;
}

/// Trait for rendering accepted regions onto a copy of the source raster.
pub trait RegionAnnotator: Send + Sync {
    fn annotate(&self, base: &RgbImage, regions: &[CandidateRegion]) -> Result<RgbImage>;
}
