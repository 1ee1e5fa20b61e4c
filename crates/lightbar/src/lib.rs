//! # Light-bar Candidate Region Detection
//!
//! A single-frame, rule-based detector for thin, brightly-coloured strips
//! (light bars) in a colour raster. The pipeline segments the image in HSV
//! space, cleans the mask morphologically, traces outer contours and keeps
//! the ones whose geometry matches a light bar.
//!
//! ## Core Features
//!
//! - **Trait-based Stages**: swap any stage by implementing its trait
//! - **Pipeline Builder**: compose stages with a fluent API
//! - **Explicit Configuration**: every threshold lives in [`DetectorConfig`]
//! - **Deterministic**: identical input and configuration always yield the
//!   same region sequence
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lightbar::{DetectorConfig, Pipeline};
//!
//! let image = image::open("hero.png")?.to_rgb8();
//!
//! let pipeline = Pipeline::from_config(&DetectorConfig::default())?;
//! let detection = pipeline.process(&image)?;
//!
//! for region in &detection.regions {
//!     println!(
//!         "bar at ({}, {}): area {:.0}, aspect {:.2}",
//!         region.bounding_box.x,
//!         region.bounding_box.y,
//!         region.area,
//!         region.aspect_ratio,
//!     );
//! }
//! detection.annotated.save("output_result.jpg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust
//! use lightbar::{ColorClass, ColorRange, InRangeSegmenter, OpenCloseCleaner, Pipeline};
//!
//! let pipeline = Pipeline::builder()
//!     .set_segmenter(InRangeSegmenter::new(vec![ColorRange::preset(ColorClass::Blue)])?)
//!     .set_cleaner(OpenCloseCleaner::new(5)?)
//!     .build();
//! # Ok::<(), lightbar::DetectError>(())
//! ```

// Core modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use algorithms::*;
pub use config::{AcceptanceThresholds, DetectorConfig};
pub use error::{DetectError, Result};
pub use pipeline::{builder::PipelineBuilder, Pipeline};
pub use traits::*;
pub use types::{BoundingBox, CandidateRegion, Contour, Detection};
