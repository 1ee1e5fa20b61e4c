pub mod builder;

use image::RgbImage;
use tracing::{debug, info};

use crate::algorithms::colorspace;
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::traits::{
    ContourTracer, ImagePreprocessor, MaskCleaner, MaskSegmenter, RegionAnnotator, RegionFilter,
};
use crate::types::Detection;

/// Sequential light-bar detection pipeline.
///
/// Stages run in fixed order: optional colour preprocessing, HSV
/// conversion, in-range segmentation, morphological cleanup, outer-contour
/// tracing, geometric filtering, annotation. Each stage consumes immutable
/// input and returns a fresh buffer, so a caller may run independent images
/// through the same pipeline concurrently.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    segmenter: Box<dyn MaskSegmenter>,
    cleaner: Box<dyn MaskCleaner>,
    tracer: Box<dyn ContourTracer>,
    filter: Box<dyn RegionFilter>,
    annotator: Box<dyn RegionAnnotator>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Build a pipeline from a validated [`DetectorConfig`].
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        builder::PipelineBuilder::from_config(config)
    }

    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        segmenter: Box<dyn MaskSegmenter>,
        cleaner: Box<dyn MaskCleaner>,
        tracer: Box<dyn ContourTracer>,
        filter: Box<dyn RegionFilter>,
        annotator: Box<dyn RegionAnnotator>,
    ) -> Self {
        Self {
            preprocessors,
            segmenter,
            cleaner,
            tracer,
            filter,
            annotator,
        }
    }

    /// Run the full pipeline over one raster.
    pub fn process(&self, image: &RgbImage) -> Result<Detection> {
        let mut working = image.clone();
        for preprocessor in &self.preprocessors {
            working = preprocessor.preprocess(&working)?;
        }

        let hsv = colorspace::to_hsv(&working)?;
        let mask = self.segmenter.segment(&hsv)?;
        debug!("segmented {}x{} mask", mask.width(), mask.height());

        let mask = self.cleaner.clean(&mask)?;

        let contours = self.tracer.trace(&mask)?;
        info!("found {} contours", contours.len());

        let regions = self.filter.filter(&contours, (image.width(), image.height()))?;
        info!("kept {} light-bar candidates", regions.len());

        let annotated = self.annotator.annotate(image, &regions)?;

        Ok(Detection { regions, mask, annotated })
    }
}
