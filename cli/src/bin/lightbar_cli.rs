use clap::{Parser, Subcommand};
use cli::{load_detector_config, parse_classes, ArtifactPaths, DetectionJob, JobError};
use color_eyre::eyre::Result;
use image::RgbImage;
use lightbar::{
    colorspace, DetectorConfig, GaussianBlurPreprocessor, ImagePreprocessor,
    MeanBlurPreprocessor, Pipeline,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect light bars in a single image
    Detect {
        /// Path to the input image
        input: PathBuf,
        /// Directory for the output artifacts
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Optional detector configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Colour classes to segment (comma separated, e.g. "red,blue")
        #[arg(long, value_delimiter = ',')]
        classes: Option<Vec<String>>,
    },
    /// Run a detection job described by a configuration file
    Process {
        /// Path to the job file (.toml or .json)
        #[arg(short, long)]
        job: PathBuf,
    },
    /// Print basic information about an image
    Info {
        /// Path to the image
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect { input, output_dir, config, classes } => {
            let mut detector = match config {
                Some(path) => load_detector_config(path)?,
                None => DetectorConfig::default(),
            };
            if let Some(classes) = classes {
                detector = detector.with_classes(&parse_classes(classes)?);
            }
            run_detection(input, output_dir, &detector)?;
        }
        Commands::Process { job } => {
            let job = DetectionJob::from_file(job)?;
            run_detection(&job.input, &job.output_dir, &job.detector)?;
        }
        Commands::Info { input } => {
            print_image_info(input)?;
        }
    }

    Ok(())
}

fn run_detection(input: &Path, output_dir: &Path, config: &DetectorConfig) -> Result<()> {
    let image = load_image(input)?;
    info!(
        "loaded {:?}: {}x{}, 3 channels",
        input,
        image.width(),
        image.height()
    );

    std::fs::create_dir_all(output_dir)?;
    let paths = ArtifactPaths::in_dir(output_dir);

    // Preview artifacts: grayscale rendition plus both blur passes.
    colorspace::to_grayscale(&image)?.save(&paths.gray)?;
    MeanBlurPreprocessor::new(config.mean_blur_kernel)?
        .preprocess(&image)?
        .save(&paths.mean_blur)?;
    GaussianBlurPreprocessor::new(config.gaussian_blur_kernel, config.gaussian_sigma)?
        .preprocess(&image)?
        .save(&paths.gaussian_blur)?;

    let pipeline = Pipeline::from_config(config)?;
    let detection = pipeline.process(&image)?;

    detection.mask.save(&paths.mask)?;
    detection.annotated.save(&paths.annotated)?;
    let json = serde_json::to_string_pretty(&detection.regions).map_err(JobError::from)?;
    std::fs::write(&paths.detections, json)?;

    info!(
        "detected {} light-bar candidate(s); artifacts written to {:?}",
        detection.regions.len(),
        output_dir
    );
    Ok(())
}

fn print_image_info(input: &Path) -> Result<()> {
    let image = load_image(input)?;
    let (width, height) = image.dimensions();
    println!("path: {}", input.display());
    println!("dimensions: {} x {}", width, height);
    println!("channels: 3");
    println!("total pixels: {}", u64::from(width) * u64::from(height));
    Ok(())
}

fn load_image(input: &Path) -> Result<RgbImage> {
    let image = image::open(input).map_err(JobError::from)?;
    Ok(image.to_rgb8())
}
