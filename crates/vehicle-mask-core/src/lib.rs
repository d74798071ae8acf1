pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod segmenter;

pub use error::{MaskError, Result};
pub use frame::{ColorImage, Mask};
pub use pipeline::{compute_mask, MaskSettings};
