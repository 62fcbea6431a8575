mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polaroid", about = "Polaroid photo wall: collage layout, viewer and uploads")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Gallery config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay photos out on the collage and apply drags
    Layout(commands::layout::LayoutArgs),
    /// Replay key presses and pointer gestures in the viewer
    View(commands::view::ViewArgs),
    /// Stage files and run a simulated upload
    Upload(commands::upload::UploadArgs),
    /// Show the tilt derived from seeds
    Rotation(commands::rotation::RotationArgs),
    /// Per-year counts and filtered listings
    Years(commands::years::YearsArgs),
    /// Print or save the effective config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Layout(args) => commands::layout::run(args, &config),
        Commands::View(args) => commands::view::run(args),
        Commands::Upload(args) => commands::upload::run(args, &config),
        Commands::Rotation(args) => commands::rotation::run(args),
        Commands::Years(args) => commands::years::run(args),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
