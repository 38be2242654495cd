use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rollnav_sim::config::SimConfig;
use rollnav_sim::path::PathKind;
use rollnav_sim::runner::{RunSummary, Simulation};

/// Drive a rolling, banking object along a path and print one JSON record per frame.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file (defaults to $ROLLNAV_SIM_CONFIG, then config/sim.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of frames
    #[arg(short, long)]
    frames: Option<u32>,

    /// Override the fixed frame duration in seconds
    #[arg(long)]
    dt: Option<f32>,

    /// Override the path layout
    #[arg(short, long, value_enum)]
    path: Option<PathKind>,

    /// Print only the run summary
    #[arg(short, long)]
    summary: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Invalid config {}: {e}", path.display());
                return ExitCode::FAILURE;
            },
        },
        None => SimConfig::load(),
    };
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(dt) = args.dt {
        config.dt = dt;
    }
    if let Some(path) = args.path {
        config.path = path;
    }

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!("Invalid config: {e}");
            return ExitCode::FAILURE;
        },
    };

    tracing::info!("rollnav simulation starting");
    let records = sim.run();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = if args.summary {
        write_json(&mut out, &RunSummary::from_records(&records))
    } else {
        records.iter().try_for_each(|r| write_json(&mut out, r))
    };
    if let Err(e) = result {
        tracing::error!("Failed to write output: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}
