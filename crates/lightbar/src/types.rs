use geo_types::{Coord, LineString, Polygon};
use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Ordered outer boundary of one connected foreground region.
///
/// Points are integer pixel coordinates in traversal order; the curve is not
/// closed by repeating the first point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// A boundary with fewer than three points encloses nothing.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Convert to a geo-types polygon for geometric operations.
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: f64::from(x),
                y: f64::from(y),
            })
            .collect();

        Polygon::new(LineString::new(coords), vec![])
    }

    /// Shoelace area of the boundary polygon.
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Tight axis-aligned box around the boundary, or `None` when the
    /// contour has no points.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let (&[first_x, first_y], rest) = self.points.split_first()?;

        let mut min_x = first_x;
        let mut min_y = first_y;
        let mut max_x = first_x;
        let mut max_y = first_y;

        for &[x, y] in rest {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

/// Axis-aligned rectangle in pixel coordinates. Width and height count
/// pixels, so a box around a single pixel is 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Height over width. Callers guarantee `width > 0`.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    pub fn fits_within(&self, raster_width: u32, raster_height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + i64::from(self.width) <= i64::from(raster_width)
            && self.y as i64 + i64::from(self.height) <= i64::from(raster_height)
    }

    /// Every candidate region must lie inside the source raster; a box that
    /// escapes it means a bug upstream, not bad input.
    pub fn ensure_within(&self, raster_width: u32, raster_height: u32) -> Result<()> {
        if !self.fits_within(raster_width, raster_height) {
            return Err(DetectError::OutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                raster_width,
                raster_height,
            });
        }
        Ok(())
    }
}

/// A contour that passed the geometric acceptance rules. Immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRegion {
    pub bounding_box: BoundingBox,
    /// Shoelace area of the region's outer boundary, in pixels.
    pub area: f64,
    /// Bounding-box height over width.
    pub aspect_ratio: f64,
}

/// Full output of one pipeline run over a single raster.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Accepted regions, in contour-traversal order.
    pub regions: Vec<CandidateRegion>,
    /// Binary segmentation mask after morphological cleanup.
    pub mask: GrayImage,
    /// Copy of the source raster with accepted regions outlined and labeled.
    pub annotated: RgbImage,
}
