mod commands;
mod logging;
mod progress;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plante", about = "Plant sample segmentation and area measurement")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append diagnostic logs to this file
    #[arg(long, global = true, default_value = "plante.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and color type
    Info(commands::info::InfoArgs),
    /// Write a display-sized preview of an image
    Preview(commands::preview::PreviewArgs),
    /// Derive the pixel-to-real-world conversion factor from two points
    Calibrate(commands::calibrate::CalibrateArgs),
    /// Extract, label and measure every sample in an image
    Run(commands::run::RunArgs),
    /// Print or save a default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, &cli.log_file)?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Preview(args) => commands::preview::run(args),
        Commands::Calibrate(args) => commands::calibrate::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
