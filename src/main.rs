use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use match_timeline::config::Config;
use match_timeline::logging::init_logging;
use match_timeline::pipeline::{game_score, Pipeline};

#[derive(Parser)]
#[command(name = "match-timeline")]
#[command(about = "Match event timeline normalization and score derivation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw events payload into the canonical timeline
    Normalize {
        /// Path to the raw events JSON file
        input: PathBuf,
    },
    /// Derive the final score from a raw events payload
    Score {
        /// Path to the raw events JSON file
        input: PathBuf,
    },
    /// Run the full pipeline: timeline, score and score markers
    Run {
        /// Path to the raw events JSON file
        input: PathBuf,
    },
}

fn load_raw(path: &PathBuf) -> Result<serde_json::Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::load_or_default();
    init_logging(&config.logging);

    let cli = Cli::parse();
    let pipeline = Pipeline::new();
    let pretty = config.output.pretty;

    match cli.command {
        Commands::Normalize { input } => {
            info!("Normalizing events from {}", input.display());
            let raw = load_raw(&input)?;
            let timeline = pipeline.normalize(&raw)?;
            emit(&timeline, pretty)?;
        }
        Commands::Score { input } => {
            info!("Scoring events from {}", input.display());
            let raw = load_raw(&input)?;
            let timeline = pipeline.normalize(&raw)?;
            let score = game_score(&timeline.events);
            emit(&score, pretty)?;
        }
        Commands::Run { input } => {
            info!("Running full pipeline on {}", input.display());
            let raw = load_raw(&input)?;
            let result = pipeline.run(&raw)?;
            emit(&result, pretty)?;
        }
    }

    Ok(())
}
