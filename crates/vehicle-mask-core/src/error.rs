use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Segmentation model not configured: {0}")]
    ConfigurationUnavailable(String),

    #[error("Failed to read input image {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write mask {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid mask settings: {0}")]
    Config(String),

    #[error("External segmenter error: {0}")]
    Segmenter(String),
}

impl MaskError {
    /// Process exit status for this error, matching the codes of the
    /// segmenter script.
    pub fn exit_status(&self) -> i32 {
        match self {
            Self::ConfigurationUnavailable(_) => 3,
            Self::InputRead { .. } => 4,
            Self::OutputWrite { .. } => 5,
            Self::Io(_)
            | Self::InvalidDimensions { .. }
            | Self::Config(_)
            | Self::Segmenter(_) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;
