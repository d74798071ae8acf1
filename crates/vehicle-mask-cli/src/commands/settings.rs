use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vehicle_mask_core::consts::{
    DEFAULT_DILATE_ITERS, DEFAULT_EDGE_HIGH, DEFAULT_EDGE_LOW, DEFAULT_ERODE_ITERS,
    DEFAULT_FEATHER, DEFAULT_KERNEL_SIZE, DEFAULT_MIN_AREA, DEFAULT_WHITE_THRESHOLD,
};
use vehicle_mask_core::pipeline::MaskSettings;

/// Mask options shared by every masking subcommand.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Mask settings file (TOML); overrides the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lower edge threshold
    #[arg(long, default_value_t = DEFAULT_EDGE_LOW, allow_negative_numbers = true)]
    pub canny_low: i32,

    /// Upper edge threshold
    #[arg(long, default_value_t = DEFAULT_EDGE_HIGH, allow_negative_numbers = true)]
    pub canny_high: i32,

    /// Structuring element size (even sizes are rounded up)
    #[arg(long, default_value_t = DEFAULT_KERNEL_SIZE, allow_negative_numbers = true)]
    pub kernel: i32,

    /// Dilation passes
    #[arg(long, default_value_t = DEFAULT_DILATE_ITERS, allow_negative_numbers = true)]
    pub dilate: i32,

    /// Erosion passes
    #[arg(long, default_value_t = DEFAULT_ERODE_ITERS, allow_negative_numbers = true)]
    pub erode: i32,

    /// Also mark every pixel darker than the white backdrop
    #[arg(long)]
    pub white_cyc: bool,

    /// White threshold (0-255); anything else derives it from the image
    #[arg(long, default_value_t = DEFAULT_WHITE_THRESHOLD, allow_negative_numbers = true)]
    pub white_thr: i32,

    /// Drop connected regions smaller than this many pixels
    #[arg(long, default_value_t = DEFAULT_MIN_AREA, allow_negative_numbers = true)]
    pub min_area: i32,

    /// Edge feathering radius (0 disables)
    #[arg(long, default_value_t = DEFAULT_FEATHER, allow_negative_numbers = true)]
    pub feather: i32,

    /// Write the object as black on white
    #[arg(long)]
    pub invert: bool,
}

impl SettingsArgs {
    /// Settings from `--config` when given, otherwise from the flags.
    pub fn resolve(&self) -> Result<MaskSettings> {
        if let Some(ref path) = self.config {
            return MaskSettings::from_toml_file(path)
                .with_context(|| format!("Failed to load mask settings {}", path.display()));
        }
        Ok(MaskSettings {
            edge_low: self.canny_low,
            edge_high: self.canny_high,
            kernel_size: self.kernel,
            dilate_iters: self.dilate,
            erode_iters: self.erode,
            white_cycle_mode: self.white_cyc,
            white_threshold: self.white_thr,
            min_area: self.min_area,
            feather: self.feather,
            invert: self.invert,
        })
    }
}
