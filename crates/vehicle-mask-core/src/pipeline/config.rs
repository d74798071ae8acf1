use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DILATE_ITERS, DEFAULT_EDGE_HIGH, DEFAULT_EDGE_LOW, DEFAULT_ERODE_ITERS,
    DEFAULT_FEATHER, DEFAULT_KERNEL_SIZE, DEFAULT_MIN_AREA, DEFAULT_WHITE_THRESHOLD,
};
use crate::detection::morphology::effective_kernel_size;
use crate::error::{MaskError, Result};

/// Parameters of the heuristic mask pipeline.
///
/// Values are taken as given: out-of-range numbers are normalized where
/// they are used (see the accessor methods), never rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSettings {
    /// Lower hysteresis threshold for edge detection.
    #[serde(default = "default_edge_low")]
    pub edge_low: i32,
    /// Upper hysteresis threshold for edge detection.
    #[serde(default = "default_edge_high")]
    pub edge_high: i32,
    /// Structuring element size (forced odd, at least 1).
    #[serde(default = "default_kernel_size")]
    pub kernel_size: i32,
    /// Dilation passes; 0 or less skips dilation.
    #[serde(default = "default_dilate_iters")]
    pub dilate_iters: i32,
    /// Erosion passes; 0 or less skips erosion.
    #[serde(default = "default_erode_iters")]
    pub erode_iters: i32,
    /// Treat everything darker than a near-white backdrop as foreground.
    #[serde(default)]
    pub white_cycle_mode: bool,
    /// Explicit white threshold; outside [0, 255] means automatic.
    #[serde(default = "default_white_threshold")]
    pub white_threshold: i32,
    /// Minimum 8-connected component area kept; 0 or less keeps all.
    #[serde(default = "default_min_area")]
    pub min_area: i32,
    /// Feather radius seed; the blur kernel is `feather * 2 + 1`.
    #[serde(default = "default_feather")]
    pub feather: i32,
    /// Emit background as white and the object as black.
    #[serde(default)]
    pub invert: bool,
}

fn default_edge_low() -> i32 {
    DEFAULT_EDGE_LOW
}
fn default_edge_high() -> i32 {
    DEFAULT_EDGE_HIGH
}
fn default_kernel_size() -> i32 {
    DEFAULT_KERNEL_SIZE
}
fn default_dilate_iters() -> i32 {
    DEFAULT_DILATE_ITERS
}
fn default_erode_iters() -> i32 {
    DEFAULT_ERODE_ITERS
}
fn default_white_threshold() -> i32 {
    DEFAULT_WHITE_THRESHOLD
}
fn default_min_area() -> i32 {
    DEFAULT_MIN_AREA
}
fn default_feather() -> i32 {
    DEFAULT_FEATHER
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self {
            edge_low: DEFAULT_EDGE_LOW,
            edge_high: DEFAULT_EDGE_HIGH,
            kernel_size: DEFAULT_KERNEL_SIZE,
            dilate_iters: DEFAULT_DILATE_ITERS,
            erode_iters: DEFAULT_ERODE_ITERS,
            white_cycle_mode: false,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
            feather: DEFAULT_FEATHER,
            invert: false,
        }
    }
}

impl MaskSettings {
    /// Hysteresis thresholds as `(low, high)`, whatever order they were given in.
    pub fn edge_thresholds(&self) -> (i32, i32) {
        (
            self.edge_low.min(self.edge_high),
            self.edge_low.max(self.edge_high),
        )
    }

    /// Structuring element size actually used.
    pub fn effective_kernel_size(&self) -> usize {
        effective_kernel_size(self.kernel_size)
    }

    pub fn dilate_passes(&self) -> usize {
        self.dilate_iters.max(0) as usize
    }

    pub fn erode_passes(&self) -> usize {
        self.erode_iters.max(0) as usize
    }

    /// Minimum component area, or `None` when the filter is off.
    pub fn area_filter(&self) -> Option<usize> {
        (self.min_area > 0).then_some(self.min_area as usize)
    }

    /// Gaussian kernel side used for feathering, or `None` when off.
    pub fn feather_kernel(&self) -> Option<usize> {
        (self.feather > 0).then(|| (self.feather as usize) * 2 + 1)
    }

    /// Explicit white threshold, or `None` when it must be derived.
    pub fn explicit_white_threshold(&self) -> Option<u8> {
        u8::try_from(self.white_threshold).ok()
    }

    /// Load settings from a TOML file. Missing keys take their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MaskError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MaskError::Config(e.to_string()))
    }

    /// Command-line flags that reproduce these settings for the external
    /// segmenter script.
    pub fn to_script_args(&self) -> Vec<String> {
        let mut args = vec![
            "--canny-low".to_string(),
            self.edge_low.to_string(),
            "--canny-high".to_string(),
            self.edge_high.to_string(),
            "--kernel".to_string(),
            self.effective_kernel_size().to_string(),
            "--dilate".to_string(),
            self.dilate_iters.to_string(),
            "--erode".to_string(),
            self.erode_iters.to_string(),
        ];
        if self.white_cycle_mode {
            args.push("--white-cyc".to_string());
        }
        args.extend([
            "--white-thr".to_string(),
            self.white_threshold.to_string(),
            "--min-area".to_string(),
            self.min_area.to_string(),
            "--feather".to_string(),
            self.feather.to_string(),
        ]);
        if self.invert {
            args.push("--invert".to_string());
        }
        args
    }
}

impl std::fmt::Display for MaskSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (low, high) = self.edge_thresholds();
        write!(
            f,
            "edges {}-{}, kernel {}, dilate {}, erode {}",
            low,
            high,
            self.effective_kernel_size(),
            self.dilate_passes(),
            self.erode_passes()
        )?;
        if self.white_cycle_mode {
            match self.explicit_white_threshold() {
                Some(thr) => write!(f, ", white-cycle <{}", thr)?,
                None => write!(f, ", white-cycle auto")?,
            }
        }
        if let Some(area) = self.area_filter() {
            write!(f, ", min area {}", area)?;
        }
        if let Some(k) = self.feather_kernel() {
            write!(f, ", feather {}", k)?;
        }
        if self.invert {
            write!(f, ", inverted")?;
        }
        Ok(())
    }
}
