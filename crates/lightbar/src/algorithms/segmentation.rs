//! HSV in-range segmentation producing the binary light-bar mask.

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::algorithms::colorspace::{ensure_not_empty, HsvImage};
use crate::error::{DetectError, Result};
use crate::traits::MaskSegmenter;

/// Mask value for pixels inside a configured colour range.
pub const FOREGROUND: u8 = 255;

/// Closed HSV interval; a pixel matches when every channel lies within
/// `[lower, upper]`. Channel order and scaling follow
/// [`HsvImage`](crate::algorithms::colorspace::HsvImage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        for channel in 0..3 {
            if self.lower[channel] > self.upper[channel] {
                return Err(DetectError::InvalidParameter {
                    parameter: "hsv range",
                    value: f64::from(self.lower[channel]),
                    expected: "lower bound <= upper bound on every channel",
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|channel| {
            self.lower[channel] <= hsv[channel] && hsv[channel] <= self.upper[channel]
        })
    }
}

/// Built-in colour classes with the stock light-bar bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Red,
    Blue,
}

impl ColorClass {
    /// Stock HSV bounds for this class. Red needs two sub-ranges because its
    /// hue sits at both ends of the axis.
    pub fn bounds(self) -> Vec<HsvRange> {
        match self {
            ColorClass::Red => vec![
                HsvRange { lower: [0, 100, 100], upper: [10, 255, 255] },
                HsvRange { lower: [160, 100, 100], upper: [180, 255, 255] },
            ],
            ColorClass::Blue => vec![
                HsvRange { lower: [100, 100, 100], upper: [130, 255, 255] },
            ],
        }
    }
}

/// Named colour class with one or more HSV sub-ranges. A pixel belongs to
/// the class when any sub-range contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub name: String,
    pub bounds: Vec<HsvRange>,
}

impl ColorRange {
    pub fn new(name: impl Into<String>, bounds: Vec<HsvRange>) -> Result<Self> {
        let range = Self { name: name.into(), bounds };
        range.validate()?;
        Ok(range)
    }

    pub fn preset(class: ColorClass) -> Self {
        Self {
            name: class.to_string(),
            bounds: class.bounds(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bounds.is_empty() {
            return Err(DetectError::InvalidParameter {
                parameter: "color range",
                value: 0.0,
                expected: "at least one HSV sub-range",
            });
        }
        for bound in &self.bounds {
            bound.validate()?;
        }
        Ok(())
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.bounds.iter().any(|bound| bound.contains(hsv))
    }
}

/// Per-pixel in-range test, unioned across every configured colour class.
#[derive(Debug, Clone)]
pub struct InRangeSegmenter {
    pub ranges: Vec<ColorRange>,
}

impl Default for InRangeSegmenter {
    fn default() -> Self {
        Self {
            ranges: vec![
                ColorRange::preset(ColorClass::Red),
                ColorRange::preset(ColorClass::Blue),
            ],
        }
    }
}

impl InRangeSegmenter {
    pub fn new(ranges: Vec<ColorRange>) -> Result<Self> {
        for range in &ranges {
            range.validate()?;
        }
        Ok(Self { ranges })
    }
}

impl MaskSegmenter for InRangeSegmenter {
    fn segment(&self, hsv: &HsvImage) -> Result<GrayImage> {
        ensure_not_empty("hsv raster", hsv.width(), hsv.height())?;

        let mut mask = GrayImage::new(hsv.width(), hsv.height());
        for (x, y, pixel) in hsv.enumerate_pixels() {
            if self.ranges.iter().any(|range| range.contains(pixel.0)) {
                mask.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
        Ok(mask)
    }
}
