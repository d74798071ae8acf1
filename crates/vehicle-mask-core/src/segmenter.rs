//! Model-backed segmentation entry points and the heuristic fallback.
//!
//! A learned segmenter runs out of process. When it is not configured or
//! fails, the heuristic in [`crate::pipeline::compute_mask`] produces a
//! mask from the same [`MaskSettings`].

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::consts::{DEFAULT_SAM2_SCRIPT, SAM2_MODEL_ENV, SAM2_SCRIPT_ENV};
use crate::error::{MaskError, Result};
use crate::frame::Mask;
use crate::io::image_io::{load_color_image, save_mask};
use crate::pipeline::{compute_mask, MaskSettings};

/// Default interpreter for the external segmenter script.
const SCRIPT_INTERPRETER: &str = "python3";

/// Which path produced a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskSource {
    External,
    Heuristic,
}

impl std::fmt::Display for MaskSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External => write!(f, "external segmenter"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Presence gate for the segmentation model.
#[derive(Clone, Debug, Default)]
pub struct ModelGate {
    model: Option<String>,
}

impl ModelGate {
    pub fn new(model: Option<String>) -> Self {
        Self { model }
    }

    /// Read the model reference from `SAM2_MODEL`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(SAM2_MODEL_ENV).ok())
    }

    /// The configured model, if any. Only an empty value counts as unset;
    /// any other value, whitespace included, is passed through untouched.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }

    /// Fail with `ConfigurationUnavailable` unless a model is configured.
    pub fn require(&self) -> Result<&str> {
        self.model().ok_or_else(|| {
            MaskError::ConfigurationUnavailable(format!("set {SAM2_MODEL_ENV}"))
        })
    }
}

/// Location of the external segmenter script: `SAM2_MASK_SCRIPT` or the
/// bundled default.
pub fn script_path_from_env() -> PathBuf {
    std::env::var_os(SAM2_SCRIPT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAM2_SCRIPT))
}

/// Out-of-process segmenter: a script launched through an interpreter as
/// `<interpreter> <script> --input IN --output OUT <settings flags>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalSegmenter {
    interpreter: PathBuf,
    script: PathBuf,
}

impl ExternalSegmenter {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: PathBuf::from(SCRIPT_INTERPRETER),
            script: script.into(),
        }
    }

    /// Script from [`script_path_from_env`], default interpreter.
    pub fn from_env() -> Self {
        Self::new(script_path_from_env())
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn is_available(&self) -> bool {
        self.script.is_file()
    }

    /// Run the script with the settings forwarded as flags.
    ///
    /// Succeeds only when the script exits with status 0 and the output
    /// file exists afterwards.
    pub fn run(&self, input: &Path, output: &Path, settings: &MaskSettings) -> Result<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let status = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg("--input")
            .arg(input)
            .arg("--output")
            .arg(output)
            .args(settings.to_script_args())
            .status()?;

        if !status.success() {
            return Err(MaskError::Segmenter(format!(
                "{} exited with {}",
                self.script.display(),
                status
            )));
        }
        if !output.exists() {
            return Err(MaskError::Segmenter(format!(
                "{} produced no output at {}",
                self.script.display(),
                output.display()
            )));
        }
        Ok(())
    }
}

/// Load `input`, compute its mask and write it to `output`.
///
/// The output is written only after the mask has been computed.
pub fn mask_file(input: &Path, output: &Path, settings: &MaskSettings) -> Result<Mask> {
    let image = load_color_image(input)?;
    let mask = compute_mask(&image, settings)?;
    save_mask(&mask, output)?;
    Ok(mask)
}

/// Model-gated entry point: refuse to touch the image unless a model is
/// configured, then produce the mask.
pub fn mask_file_gated(
    gate: &ModelGate,
    input: &Path,
    output: &Path,
    settings: &MaskSettings,
) -> Result<Mask> {
    let model = gate.require()?;
    info!(model, input = %input.display(), "Segmentation model configured");
    mask_file(input, output, settings)
}

/// Produce a mask for `input` at `output`, preferring `segmenter` and
/// falling back to the heuristic when its script is missing or fails.
pub fn generate_vehicle_mask(
    segmenter: &ExternalSegmenter,
    input: &Path,
    output: &Path,
    settings: &MaskSettings,
) -> Result<MaskSource> {
    let script = segmenter.script();
    if segmenter.is_available() {
        match segmenter.run(input, output, settings) {
            Ok(()) => {
                info!(script = %script.display(), "External segmenter produced mask");
                return Ok(MaskSource::External);
            }
            Err(e) => warn!(error = %e, "External segmenter failed, using heuristic mask"),
        }
    } else {
        info!(script = %script.display(), "External segmenter not found, using heuristic mask");
    }

    mask_file(input, output, settings)?;
    Ok(MaskSource::Heuristic)
}
