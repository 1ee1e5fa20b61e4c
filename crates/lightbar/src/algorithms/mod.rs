pub mod annotation;
pub mod classification;
pub mod colorspace;
pub mod extraction;
pub mod morphology;
pub mod preprocessing;
pub mod segmentation;

pub use annotation::*;
pub use classification::*;
pub use colorspace::*;
pub use extraction::*;
pub use morphology::*;
pub use preprocessing::*;
pub use segmentation::*;
