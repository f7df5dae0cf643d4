#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Skirmish session.

mod config;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::{config::Config, session::SessionOptions};

/// Runs the Skirmish simulation without a window and prints a summary.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with [simulation], [player], [bot] and [map] tables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for map generation and every in-game roll.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated time in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,
    /// Wall-clock delta per frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Map width in tiles, overriding the config file.
    #[arg(long)]
    width: Option<usize>,
    /// Map height in tiles, overriding the config file.
    #[arg(long)]
    height: Option<usize>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Entry point for the Skirmish command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.override_map(args.width, args.height);
    let options = SessionOptions {
        seed: args.seed,
        duration: Duration::from_millis(args.duration_ms),
        frame: Duration::from_millis(args.frame_ms),
    };

    let summary = session::run(&config, &options)?;
    info!(
        ticks = summary.ticks,
        living_enemies = summary.living_enemies,
        "session complete"
    );
    println!("{summary}");
    Ok(())
}
