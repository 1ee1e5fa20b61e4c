use std::fs;
use std::path::{Path, PathBuf};

use lightbar::DetectorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Detect(#[from] lightbar::DetectError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unknown color class '{0}' (expected one of: red, blue)")]
    UnknownColorClass(String),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// A detection run described as a file: input raster, output directory and
/// an optional embedded detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub detector: DetectorConfig,
}

impl DetectionJob {
    /// Load a job from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a job from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, JobError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a job from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a job from a JSON string
    pub fn from_json(content: &str) -> Result<Self, JobError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(JobError::UnsupportedFileFormat),
        }
    }
}

/// Load a bare [`DetectorConfig`] from a `.toml` or `.json` file.
pub fn load_detector_config<P: AsRef<Path>>(path: P) -> Result<DetectorConfig, JobError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(JobError::UnsupportedFileFormat),
    }
}

/// Output artifact paths for one detection run, named after the stock
/// detector's output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub gray: PathBuf,
    pub mean_blur: PathBuf,
    pub gaussian_blur: PathBuf,
    pub mask: PathBuf,
    pub annotated: PathBuf,
    pub detections: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            gray: output_dir.join("output_gray.jpg"),
            mean_blur: output_dir.join("output_blur.jpg"),
            gaussian_blur: output_dir.join("output_gaussian.jpg"),
            mask: output_dir.join("output_lightbar_mask.jpg"),
            annotated: output_dir.join("output_result.jpg"),
            detections: output_dir.join("detections.json"),
        }
    }
}

/// Parse comma-separated colour class names (`"red,blue"`).
pub fn parse_classes(raw: &[String]) -> Result<Vec<lightbar::ColorClass>, JobError> {
    raw.iter()
        .map(|name| {
            name.trim()
                .parse()
                .map_err(|_| JobError::UnknownColorClass(name.clone()))
        })
        .collect()
}
