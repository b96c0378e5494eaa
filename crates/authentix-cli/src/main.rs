mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use authentix_core::config::AppConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "authentix", about = "Photo and preference toolkit for Authentix uploads")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image metadata and the crop geometry it would get
    Info(commands::info::InfoArgs),
    /// Downscale listing photos to upload size
    Resize(commands::resize::ResizeArgs),
    /// Crop a profile photo to a square
    Crop(commands::crop::CropArgs),
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
    /// Show or change the guest discovery location
    Location(commands::location::LocationArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.config {
        Some(ref path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Resize(args) => commands::resize::run(args, &config),
        Commands::Crop(args) => commands::crop::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
        Commands::Location(args) => commands::location::run(args, &config),
    }
}
