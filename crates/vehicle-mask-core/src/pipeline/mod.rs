pub mod batch;
pub mod config;
mod mask;
mod types;

pub use batch::{collect_images, mask_directory, plan_outputs};
pub use config::MaskSettings;
pub use mask::{binarize, compute_mask, feather, shape_edges};
pub use types::{BatchItem, MaskStage, NoOpReporter, ProgressReporter};
