//! Configuration surface for the detection pipeline.
//!
//! Every tunable the pipeline consumes lives here so callers (and test
//! harnesses) can override the stock values instead of recompiling.

use serde::{Deserialize, Serialize};

use crate::algorithms::segmentation::{ColorClass, ColorRange};
use crate::error::{DetectError, Result};

/// Geometric acceptance rules applied to each traced contour.
///
/// Area and aspect-ratio bounds are strict on both ends; the width and
/// height minima are strict lower bounds. Defaults reproduce the stock
/// light-bar policy: `50 < area < 5000`, `1.5 < aspect < 8.0`,
/// `width > 3`, `height > 10`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceThresholds {
    pub min_area: f64,
    pub max_area: f64,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for AcceptanceThresholds {
    fn default() -> Self {
        Self {
            min_area: 50.0,
            max_area: 5000.0,
            min_aspect_ratio: 1.5,
            max_aspect_ratio: 8.0,
            min_width: 3,
            min_height: 10,
        }
    }
}

impl AcceptanceThresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(DetectError::InvalidParameter {
                parameter: "minimum area",
                value: self.min_area,
                expected: "a finite value >= 0",
            });
        }
        if !self.max_area.is_finite() || self.max_area <= self.min_area {
            return Err(DetectError::InvalidParameter {
                parameter: "maximum area",
                value: self.max_area,
                expected: "a finite value greater than the minimum area",
            });
        }
        if !self.min_aspect_ratio.is_finite() || self.min_aspect_ratio <= 0.0 {
            return Err(DetectError::InvalidParameter {
                parameter: "minimum aspect ratio",
                value: self.min_aspect_ratio,
                expected: "a finite value > 0",
            });
        }
        if !self.max_aspect_ratio.is_finite() || self.max_aspect_ratio <= self.min_aspect_ratio {
            return Err(DetectError::InvalidParameter {
                parameter: "maximum aspect ratio",
                value: self.max_aspect_ratio,
                expected: "a finite value greater than the minimum aspect ratio",
            });
        }
        Ok(())
    }
}

/// Full pipeline configuration. `Default` reproduces the stock detector:
/// 5x5 blurs with sigma 1.0, a 3x3 structuring element, and the red and
/// blue colour presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Kernel size for the mean-blur preview. Must be a positive odd value.
    pub mean_blur_kernel: u32,
    /// Kernel size for the Gaussian-blur preview. Must be a positive odd value.
    pub gaussian_blur_kernel: u32,
    pub gaussian_sigma: f32,
    /// Square structuring element edge for the open/close cleanup.
    pub structuring_element_size: u32,
    /// Colour classes to segment; the mask is the union across all of them.
    pub ranges: Vec<ColorRange>,
    pub thresholds: AcceptanceThresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mean_blur_kernel: 5,
            gaussian_blur_kernel: 5,
            gaussian_sigma: 1.0,
            structuring_element_size: 3,
            ranges: vec![
                ColorRange::preset(ColorClass::Red),
                ColorRange::preset(ColorClass::Blue),
            ],
            thresholds: AcceptanceThresholds::default(),
        }
    }
}

impl DetectorConfig {
    /// Replace the colour classes with the presets for `classes`.
    pub fn with_classes(mut self, classes: &[ColorClass]) -> Self {
        self.ranges = classes.iter().map(|&class| ColorRange::preset(class)).collect();
        self
    }

    /// Check the whole surface up front; the first offending parameter wins.
    pub fn validate(&self) -> Result<()> {
        crate::algorithms::preprocessing::ensure_odd_kernel(
            "mean blur kernel",
            self.mean_blur_kernel,
        )?;
        crate::algorithms::preprocessing::ensure_odd_kernel(
            "gaussian blur kernel",
            self.gaussian_blur_kernel,
        )?;
        if !self.gaussian_sigma.is_finite() || self.gaussian_sigma <= 0.0 {
            return Err(DetectError::InvalidParameter {
                parameter: "gaussian sigma",
                value: f64::from(self.gaussian_sigma),
                expected: "a finite value > 0",
            });
        }
        for range in &self.ranges {
            range.validate()?;
        }
        self.thresholds.validate()
    }
}
