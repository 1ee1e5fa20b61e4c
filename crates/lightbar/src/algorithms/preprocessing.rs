//! Noise-suppression blurs applied to the colour raster before conversion.
//!
//! Both filters run as separable 1-D passes and replicate border pixels, so
//! output dimensions always equal input dimensions.

use image::RgbImage;
use imageproc::filter::separable_filter_equal;

use crate::algorithms::colorspace::ensure_not_empty;
use crate::error::{DetectError, Result};
use crate::traits::ImagePreprocessor;

pub(crate) fn ensure_odd_kernel(parameter: &'static str, size: u32) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(DetectError::InvalidParameter {
            parameter,
            value: f64::from(size),
            expected: "a positive odd kernel size",
        });
    }
    Ok(())
}

/// Box/mean blur over each colour channel.
#[derive(Debug, Clone)]
pub struct MeanBlurPreprocessor {
    pub kernel_size: u32,
}

impl Default for MeanBlurPreprocessor {
    fn default() -> Self {
        Self { kernel_size: 5 }
    }
}

impl MeanBlurPreprocessor {
    pub fn new(kernel_size: u32) -> Result<Self> {
        ensure_odd_kernel("mean blur kernel", kernel_size)?;
        Ok(Self { kernel_size })
    }
}

impl ImagePreprocessor for MeanBlurPreprocessor {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        ensure_not_empty("raster", image.width(), image.height())?;
        ensure_odd_kernel("mean blur kernel", self.kernel_size)?;

        let len = self.kernel_size as usize;
        let kernel = vec![1.0_f32 / len as f32; len];
        Ok(separable_filter_equal(image, &kernel))
    }
}

/// Gaussian blur with an explicit kernel size and sigma.
///
/// `imageproc::filter::gaussian_blur_f32` sizes its kernel from sigma alone;
/// building the 1-D kernel here honours both parameters.
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub kernel_size: u32,
    pub sigma: f32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self { kernel_size: 5, sigma: 1.0 }
    }
}

impl GaussianBlurPreprocessor {
    pub fn new(kernel_size: u32, sigma: f32) -> Result<Self> {
        gaussian_kernel(kernel_size, sigma)?;
        Ok(Self { kernel_size, sigma })
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        ensure_not_empty("raster", image.width(), image.height())?;
        let kernel = gaussian_kernel(self.kernel_size, self.sigma)?;
        Ok(separable_filter_equal(image, &kernel))
    }
}

fn gaussian_kernel(size: u32, sigma: f32) -> Result<Vec<f32>> {
    ensure_odd_kernel("gaussian blur kernel", size)?;
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(DetectError::InvalidParameter {
            parameter: "gaussian sigma",
            value: f64::from(sigma),
            expected: "a finite value > 0",
        });
    }

    let radius = i64::from(size / 2);
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|offset| {
            let distance = offset as f32;
            (-(distance * distance) / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let total: f32 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= total;
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_even_or_zero_kernel_is_rejected() {
        assert!(matches!(
            MeanBlurPreprocessor::new(4),
            Err(DetectError::InvalidParameter { value, .. }) if value == 4.0
        ));
        assert!(MeanBlurPreprocessor::new(0).is_err());
        assert!(GaussianBlurPreprocessor::new(2, 1.0).is_err());
    }

    #[test]
    fn test_non_positive_sigma_is_rejected() {
        assert!(GaussianBlurPreprocessor::new(5, 0.0).is_err());
        assert!(GaussianBlurPreprocessor::new(5, -1.0).is_err());
        assert!(GaussianBlurPreprocessor::new(5, f32::NAN).is_err());
    }

    #[test]
    fn test_blur_preserves_dimensions() {
        let image = RgbImage::new(17, 11);
        let mean = MeanBlurPreprocessor::new(5).unwrap();
        let gaussian = GaussianBlurPreprocessor::new(7, 1.5).unwrap();
        assert_eq!(mean.preprocess(&image).unwrap().dimensions(), (17, 11));
        assert_eq!(gaussian.preprocess(&image).unwrap().dimensions(), (17, 11));
    }

    #[test]
    fn test_mean_blur_leaves_constant_image_unchanged() {
        let image = RgbImage::from_pixel(9, 9, Rgb([100, 150, 200]));
        let blurred = MeanBlurPreprocessor::new(5).unwrap().preprocess(&image).unwrap();
        assert_eq!(blurred, image);
    }

    #[test]
    fn test_gaussian_kernel_is_normalised_and_symmetric() {
        let kernel = gaussian_kernel(5, 1.0).unwrap();
        assert_eq!(kernel.len(), 5);
        assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert_eq!(kernel[0], kernel[4]);
        assert_eq!(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1]);
    }

    #[test]
    fn test_blur_is_deterministic() {
        let mut image = RgbImage::new(16, 16);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8]);
        }
        let gaussian = GaussianBlurPreprocessor::new(5, 1.0).unwrap();
        assert_eq!(
            gaussian.preprocess(&image).unwrap(),
            gaussian.preprocess(&image).unwrap()
        );
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let empty = RgbImage::new(0, 5);
        assert!(matches!(
            MeanBlurPreprocessor::default().preprocess(&empty),
            Err(DetectError::EmptyInput { .. })
        ));
    }
}
