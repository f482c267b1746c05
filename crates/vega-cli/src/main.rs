mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vega", about = "Astrophotography exposure planning tool")]
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
    /// Compute signal, noise, SNR and dynamic range for an exposure plan
    Snr(commands::snr::SnrArgs),
    /// Synthesize a stacked raw frame for an exposure plan
    Simulate(commands::simulate::SimulateArgs),
    /// Estimate sensor gain/read noise/full well from calibration frames
    Calibrate(commands::calibrate::CalibrateArgs),
    /// Print or save a default plan config
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

    match &cli.command {
        Commands::Snr(args) => commands::snr::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Calibrate(args) => commands::calibrate::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
