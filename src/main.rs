//! Schelling - command-line driver
//!
//! Loads a run configuration (TOML or the built-in default), advances the
//! world for the requested number of generations, prints a summary and
//! optionally writes the full run record as JSON.

use std::path::PathBuf;

use clap::Parser;
use schelling::core::error::Result;
use schelling::{simulate, SimulationConfig};

/// Run a Schelling segregation simulation
#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Simulate Schelling segregation dynamics on a grid")]
struct Args {
    /// TOML run configuration (built-in default when omitted)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured number of generations
    #[arg(long)]
    steps: Option<u32>,

    /// Stop at the first generation in which nobody relocates
    #[arg(long)]
    until_stable: bool,

    /// Write the run record as JSON to this path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("schelling=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading config");
            SimulationConfig::load(path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if args.until_stable {
        config.stop_when_stable = true;
    }

    let output = simulate(&config)?;
    println!("{}", output.summary());

    println!("\n--- Census ---");
    for (label, count) in &output.last.census {
        println!("{:>10}: {}", label, count);
    }

    if let Some(path) = &args.output {
        std::fs::write(path, output.to_json()?)?;
        tracing::info!(path = %path.display(), "Wrote run record");
    }

    Ok(())
}
