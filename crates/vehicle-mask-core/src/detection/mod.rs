pub mod canny;
pub mod components;
pub mod fill;
pub mod morphology;
pub mod white_cycle;

pub use canny::canny;
pub use components::{label_components, remove_small_components, ComponentStats, Labeling};
pub use fill::{fill_holes, flood_fill};
pub use morphology::{dilate, effective_kernel_size, erode, StructuringElement};
