use crate::algorithms::{
    BoxAnnotator, GeometricClassifier, ImageprocContourTracer, InRangeSegmenter,
    OpenCloseCleaner,
};
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::traits::{
    ContourTracer, ImagePreprocessor, MaskCleaner, MaskSegmenter, RegionAnnotator, RegionFilter,
};

/// Builder for detection pipelines with a fluent API. Any stage left unset
/// falls back to the stock implementation.
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    segmenter: Option<Box<dyn MaskSegmenter>>,
    cleaner: Option<Box<dyn MaskCleaner>>,
    tracer: Option<Box<dyn ContourTracer>>,
    filter: Option<Box<dyn RegionFilter>>,
    annotator: Option<Box<dyn RegionAnnotator>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            segmenter: None,
            cleaner: None,
            tracer: None,
            filter: None,
            annotator: None,
        }
    }

    /// Add a preprocessor; preprocessors run in insertion order.
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    pub fn set_segmenter<S>(mut self, segmenter: S) -> Self
    where
        S: MaskSegmenter + 'static,
    {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    pub fn set_cleaner<C>(mut self, cleaner: C) -> Self
    where
        C: MaskCleaner + 'static,
    {
        self.cleaner = Some(Box::new(cleaner));
        self
    }

    pub fn set_tracer<T>(mut self, tracer: T) -> Self
    where
        T: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    pub fn set_filter<F>(mut self, filter: F) -> Self
    where
        F: RegionFilter + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn set_annotator<A>(mut self, annotator: A) -> Self
    where
        A: RegionAnnotator + 'static,
    {
        self.annotator = Some(Box::new(annotator));
        self
    }

    /// Build the pipeline, filling unset stages with stock components.
    pub fn build(self) -> Pipeline {
        Pipeline::new(
            self.preprocessors,
            self.segmenter
                .unwrap_or_else(|| Box::new(InRangeSegmenter::default())),
            self.cleaner
                .unwrap_or_else(|| Box::new(OpenCloseCleaner::default())),
            self.tracer
                .unwrap_or_else(|| Box::new(ImageprocContourTracer)),
            self.filter
                .unwrap_or_else(|| Box::new(GeometricClassifier::default())),
            self.annotator.unwrap_or_else(|| Box::new(BoxAnnotator::new())),
        )
    }

    /// Build every stage from a [`DetectorConfig`], validating it first.
    pub fn from_config(config: &DetectorConfig) -> Result<Pipeline> {
        config.validate()?;
        Ok(Self::new()
            .set_segmenter(InRangeSegmenter::new(config.ranges.clone())?)
            .set_cleaner(OpenCloseCleaner::new(config.structuring_element_size)?)
            .set_filter(GeometricClassifier::new(config.thresholds.clone())?)
            .build())
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
