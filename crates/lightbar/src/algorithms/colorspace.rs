//! Colour-space conversions between the RGB source raster, its grayscale
//! rendition and the hue/saturation/value raster the segmenter consumes.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

use crate::error::{DetectError, Result};

/// 3-channel raster holding hue/saturation/value samples.
///
/// Channel convention (8-bit, OpenCV-compatible): hue in `[0, 180]` half
/// degrees, saturation and value in `[0, 255]`. Every [`HsvRange`] bound in
/// the crate is expressed against this convention.
///
/// [`HsvRange`]: crate::algorithms::segmentation::HsvRange
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

pub(crate) fn ensure_not_empty(what: &'static str, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyInput { what, width, height });
    }
    Ok(())
}

/// Rec. 601 luma: `0.299 R + 0.587 G + 0.114 B`, rounded to the nearest
/// 8-bit level.
pub fn to_grayscale(image: &RgbImage) -> Result<GrayImage> {
    ensure_not_empty("raster", image.width(), image.height())?;

    let mut gray = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        gray.put_pixel(x, y, Luma([luma.round() as u8]));
    }
    Ok(gray)
}

/// Convert to the HSV raster described on [`HsvImage`].
pub fn to_hsv(image: &RgbImage) -> Result<HsvImage> {
    ensure_not_empty("raster", image.width(), image.height())?;

    let mut hsv = HsvImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        hsv.put_pixel(x, y, Rgb(rgb_to_hsv(pixel.0)));
    }
    Ok(hsv)
}

fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue_degrees = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    [
        (hue_degrees / 2.0).round() as u8,
        (saturation * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    ]
}
