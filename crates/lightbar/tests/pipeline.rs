use image::{Rgb, RgbImage};
use lightbar::{AcceptanceThresholds, DetectError, DetectorConfig, Pipeline};

fn fill(image: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            image.put_pixel(x, y, color);
        }
    }
}

#[test]
fn test_single_red_bar_is_detected() {
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 47, 40, 6, 20, Rgb([255, 0, 0]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();

    assert_eq!(detection.regions.len(), 1);
    let region = &detection.regions[0];
    assert_eq!(region.bounding_box.x, 47);
    assert_eq!(region.bounding_box.y, 40);
    assert_eq!(region.bounding_box.width, 6);
    assert_eq!(region.bounding_box.height, 20);
    assert!((region.aspect_ratio - 20.0 / 6.0).abs() < 1e-9);
    // Shoelace area of a 6x20 pixel blob's outer boundary is 5 * 19 = 95.
    assert!(region.area > 50.0 && region.area < 150.0);
}

#[test]
fn test_wide_bar_fails_aspect_floor() {
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 20, 40, 60, 20, Rgb([255, 0, 0]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();
    assert!(detection.regions.is_empty());
}

#[test]
fn test_blue_bar_is_detected_alongside_red() {
    let mut image = RgbImage::new(120, 100);
    fill(&mut image, 20, 30, 6, 24, Rgb([255, 0, 0]));
    fill(&mut image, 80, 30, 6, 24, Rgb([0, 0, 255]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();

    assert_eq!(detection.regions.len(), 2);
    // Contour order is stable and row-major: the left bar comes first.
    assert_eq!(detection.regions[0].bounding_box.x, 20);
    assert_eq!(detection.regions[1].bounding_box.x, 80);
}

#[test]
fn test_unsaturated_pixels_are_ignored() {
    // White and grey are bright but have near-zero saturation.
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 47, 40, 6, 20, Rgb([255, 255, 255]));
    fill(&mut image, 10, 40, 6, 20, Rgb([128, 128, 128]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();
    assert!(detection.regions.is_empty());
}

#[test]
fn test_specks_are_cleaned_before_tracing() {
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 47, 40, 6, 20, Rgb([255, 0, 0]));
    // Single-pixel red noise that opening must remove.
    image.put_pixel(5, 5, Rgb([255, 0, 0]));
    image.put_pixel(90, 80, Rgb([255, 0, 0]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();

    assert_eq!(detection.regions.len(), 1);
    assert_eq!(detection.mask.get_pixel(5, 5).0, [0]);
    assert_eq!(detection.mask.get_pixel(90, 80).0, [0]);
}

#[test]
fn test_pipeline_is_deterministic() {
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 12, 10, 5, 18, Rgb([255, 0, 0]));
    fill(&mut image, 60, 22, 6, 30, Rgb([0, 0, 255]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let first = pipeline.process(&image).unwrap();
    let second = pipeline.process(&image).unwrap();

    assert_eq!(first.regions, second.regions);
    assert_eq!(first.mask, second.mask);
    assert_eq!(first.annotated, second.annotated);
}

#[test]
fn test_detection_artifacts_match_source_dimensions() {
    let mut image = RgbImage::new(90, 70);
    fill(&mut image, 30, 20, 6, 22, Rgb([0, 0, 255]));

    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    let detection = pipeline.process(&image).unwrap();

    assert_eq!(detection.mask.dimensions(), (90, 70));
    assert_eq!(detection.annotated.dimensions(), (90, 70));
    // The annotated raster differs from the base exactly where boxes are.
    assert_ne!(detection.annotated, image);
}

#[test]
fn test_custom_thresholds_change_the_verdict() {
    let mut image = RgbImage::new(100, 100);
    fill(&mut image, 47, 40, 6, 20, Rgb([255, 0, 0]));

    // Raise the area floor above the bar's 95 px boundary area.
    let config = DetectorConfig {
        thresholds: AcceptanceThresholds { min_area: 100.0, ..Default::default() },
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    assert!(pipeline.process(&image).unwrap().regions.is_empty());
}

#[test]
fn test_empty_raster_fails_up_front() {
    let pipeline = Pipeline::from_config(&DetectorConfig::default()).unwrap();
    assert!(matches!(
        pipeline.process(&RgbImage::new(0, 0)),
        Err(DetectError::EmptyInput { .. })
    ));
}

#[test]
fn test_invalid_config_is_rejected_before_building() {
    let config = DetectorConfig { structuring_element_size: 4, ..Default::default() };
    assert!(matches!(
        Pipeline::from_config(&config),
        Err(DetectError::InvalidParameter { .. })
    ));
}
