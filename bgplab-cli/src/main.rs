//! ## bgplab-cli
//! Terminal frontend for the BGP simulation controller: an interactive
//! console session and a non-interactive batch stepper, both driving the
//! same controller the graphical frontends use.

use clap::Parser;

use bgplab_telemetry::logging::EventLogger;
use bgplab_telemetry::metrics::MetricsRecorder;

mod commands;
mod console;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let metrics = MetricsRecorder::new();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run_interactive(args, metrics).await,
        Commands::Step(args) => commands::run_batch(args, metrics).await,
    }
}
