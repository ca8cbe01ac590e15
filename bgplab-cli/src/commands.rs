use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use url::Url;

use bgplab_client::HttpSimulationService;
use bgplab_config::BgplabConfig;
use bgplab_controller::{Phase, SimulationController};
use bgplab_core::surface::RenderSurface;
use bgplab_core::ControllerError;
use bgplab_telemetry::metrics::MetricsRecorder;

use crate::console::ConsoleSurface;

type CliError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console session against the simulation service
    Run(RunArgs),
    /// Reset the simulation and advance steps non-interactively
    Step(StepArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults to config/bgplab.yaml plus environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the simulation service base URL
    #[arg(long)]
    pub service_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StepArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub service_url: Option<String>,
    /// Steps to advance after the reset (0 runs until completion)
    #[arg(long, default_value_t = 0)]
    pub count: usize,
}

fn load_config(
    path: Option<PathBuf>,
    service_url: Option<String>,
) -> Result<BgplabConfig, CliError> {
    let mut config = match path {
        Some(path) => BgplabConfig::load_from_path(path)?,
        None => BgplabConfig::load()?,
    };
    if let Some(url) = service_url {
        config.service.base_url = url;
    }
    Ok(config)
}

fn build_controller(
    config: &BgplabConfig,
    metrics: MetricsRecorder,
) -> Result<Arc<SimulationController<HttpSimulationService>>, CliError> {
    let base: Url = config.service.base_url.parse()?;
    let service = Arc::new(HttpSimulationService::new(base, config.service.timeout())?);
    let surface = Arc::new(ConsoleSurface::new()) as Arc<dyn RenderSurface>;
    Ok(Arc::new(SimulationController::new(
        service, surface, config, metrics,
    )))
}

/// Prints only what the surface does not already show. Semantic and
/// transport failures were logged when they happened; `Busy` never
/// reaches the log and is reported here.
fn report(result: Result<(), ControllerError>) {
    if let Err(ControllerError::Busy) = result {
        println!("an operation is already in flight");
    }
}

pub async fn run_interactive(args: RunArgs, metrics: MetricsRecorder) -> Result<(), CliError> {
    let config = load_config(args.config, args.service_url)?;
    let controller = build_controller(&config, metrics)?;
    info!(url = %config.service.base_url, "starting interactive session");
    controller.initialize().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("bgplab> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("cmd") => match parts.next() {
                Some(router) => {
                    let text = parts.collect::<Vec<_>>().join(" ");
                    report(controller.submit_command(router, &text).await);
                }
                None => println!("usage: cmd <router> <command text>"),
            },
            Some("step") => report(controller.advance_step().await),
            Some("pause") => controller.pause(),
            Some("reset") => report(controller.reset().await),
            Some("state") => controller.refresh_state().await,
            Some("metrics") => println!("{}", controller.metrics().gather_metrics()?),
            Some("help") => print_help(),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown input '{other}'; type 'help'"),
        }
    }
    Ok(())
}

pub async fn run_batch(args: StepArgs, metrics: MetricsRecorder) -> Result<(), CliError> {
    let config = load_config(args.config, args.service_url)?;
    let controller = build_controller(&config, metrics)?;
    controller.initialize().await?;

    let mut advanced = 0usize;
    while controller.phase() != Phase::Complete {
        controller.advance_step().await?;
        advanced += 1;
        if args.count > 0 && advanced >= args.count {
            break;
        }
    }
    info!(steps = advanced, "batch run finished");
    Ok(())
}

fn print_help() {
    println!("  cmd <router> <text>   submit a router command");
    println!("  step                  advance the simulation one step");
    println!("  pause                 pause playback locally");
    println!("  reset                 reset the simulation");
    println!("  state                 re-fetch and render the current state");
    println!("  metrics               dump controller metrics");
    println!("  quit                  leave the session");
}
