mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vehicle_mask_core::MaskError;

#[derive(Parser)]
#[command(name = "vehicle-mask", about = "Foreground mask generator for studio vehicle photos")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mask one image (external segmenter if available, else heuristic)
    Mask(commands::mask::MaskArgs),
    /// Model-gated masking entry point with scripted exit codes
    Sam2(commands::sam2::Sam2Args),
    /// Mask every image in a directory
    Batch(commands::batch::BatchArgs),
    /// Print or save the default mask settings as TOML
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dispatch(&cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(exit_status(&e));
    }
}

fn dispatch(command: &Commands) -> Result<()> {
    match command {
        Commands::Mask(args) => commands::mask::run(args),
        Commands::Sam2(args) => commands::sam2::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

/// Status for a failed command: the core error's own status when there is
/// one anywhere in the chain, 2 otherwise.
fn exit_status(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MaskError>())
        .map_or(2, MaskError::exit_status)
}
