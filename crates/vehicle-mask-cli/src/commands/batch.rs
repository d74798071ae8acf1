use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use vehicle_mask_core::pipeline::{mask_directory, BatchItem, ProgressReporter};

use super::settings::SettingsArgs;

#[derive(Args)]
pub struct BatchArgs {
    /// Directory of input images
    pub dir: PathBuf,

    /// Directory for the `<name>_mask.png` outputs
    #[arg(short, long, default_value = "masks")]
    pub output: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total_items: usize) {
        self.pb.set_length(total_items as u64);
        self.pb.set_message("Masking");
    }

    fn advance(&self, item: &BatchItem) {
        if let Some(name) = item.input.file_name() {
            self.pb.set_message(name.to_string_lossy().into_owned());
        }
        self.pb.inc(1);
    }

    fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let settings = args.settings.resolve()?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let items = mask_directory(&args.dir, &args.output, &settings, &reporter)
        .with_context(|| format!("Failed to read directory {}", args.dir.display()))?;

    let failed: Vec<&BatchItem> = items.iter().filter(|i| i.result.is_err()).collect();
    println!(
        "\n{} of {} masks saved to {}",
        items.len() - failed.len(),
        items.len(),
        args.output.display()
    );
    for item in &failed {
        if let Err(ref e) = item.result {
            eprintln!("  {}: {}", item.input.display(), e);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("{} image(s) failed", failed.len());
    }
    Ok(())
}
