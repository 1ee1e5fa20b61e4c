use thiserror::Error;

/// Error taxonomy for the detection pipeline.
///
/// Three closed kinds, each carrying the offending values so callers can
/// branch on them instead of parsing message text. `OutOfBounds` signals a
/// broken internal invariant and is never expected from well-formed input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error("empty {what}: dimensions are {width}x{height}")]
    EmptyInput {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("invalid {parameter}: got {value}, expected {expected}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("bounding box ({x}, {y}) {width}x{height} escapes raster extent {raster_width}x{raster_height}")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        raster_width: u32,
        raster_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, DetectError>;
