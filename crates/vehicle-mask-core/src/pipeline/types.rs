use std::path::PathBuf;

/// Stage of the mask pipeline, used for progress reporting and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskStage {
    Denoising,
    EdgeDetection,
    Morphology,
    WhiteCycle,
    AreaFilter,
    HoleFill,
    Feathering,
    Inverting,
}

impl std::fmt::Display for MaskStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denoising => write!(f, "Denoising"),
            Self::EdgeDetection => write!(f, "Detecting edges"),
            Self::Morphology => write!(f, "Shaping edges"),
            Self::WhiteCycle => write!(f, "Merging non-white pixels"),
            Self::AreaFilter => write!(f, "Removing small components"),
            Self::HoleFill => write!(f, "Filling holes"),
            Self::Feathering => write!(f, "Feathering"),
            Self::Inverting => write!(f, "Inverting"),
        }
    }
}

/// Outcome of masking one file in a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: crate::error::Result<usize>,
}

/// Thread-safe progress reporting for batch runs.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A batch of `total_items` images is about to start.
    fn begin(&self, _total_items: usize) {}

    /// One image finished (successfully or not).
    fn advance(&self, _item: &BatchItem) {}

    /// Every image has been processed.
    fn finish(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
