use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;
use vehicle_mask_core::segmenter::{mask_file_gated, ModelGate};

use super::settings::SettingsArgs;

#[derive(Args)]
pub struct Sam2Args {
    /// Input image
    #[arg(long)]
    pub input: PathBuf,

    /// Output mask path
    #[arg(long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Requires `SAM2_MODEL`; failures surface as the core error so `main`
/// can turn them into the matching exit status.
pub fn run(args: &Sam2Args) -> Result<()> {
    run_with_gate(&ModelGate::from_env(), args)
}

/// The gate is checked before `--config` is read, so a missing model is
/// reported as such even when the settings file is also broken.
fn run_with_gate(gate: &ModelGate, args: &Sam2Args) -> Result<()> {
    gate.require()?;
    let settings = args.settings.resolve()?;
    let mask = mask_file_gated(gate, &args.input, &args.output, &settings)?;
    info!(
        foreground = mask.foreground_count(),
        output = %args.output.display(),
        "Mask written"
    );
    Ok(())
}
