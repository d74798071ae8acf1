use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vehicle_mask_core::segmenter::{generate_vehicle_mask, ExternalSegmenter};

use super::settings::SettingsArgs;

#[derive(Args)]
pub struct MaskArgs {
    /// Input image
    pub file: PathBuf,

    /// Output mask path
    #[arg(short, long, default_value = "mask.png")]
    pub output: PathBuf,

    /// External segmenter script (defaults to $SAM2_MASK_SCRIPT)
    #[arg(long)]
    pub script: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn run(args: &MaskArgs) -> Result<()> {
    let settings = args.settings.resolve()?;
    let segmenter = args
        .script
        .clone()
        .map_or_else(ExternalSegmenter::from_env, ExternalSegmenter::new);

    crate::summary::print_mask_summary(&args.file, &args.output, &settings);

    let source = generate_vehicle_mask(&segmenter, &args.file, &args.output, &settings)
        .with_context(|| format!("Failed to mask {}", args.file.display()))?;

    println!(
        "Mask saved to {} ({})",
        args.output.display(),
        source
    );
    Ok(())
}
