//! # Gantry
//!
//! Plays a G-code file against the stage, then holds the last position.
//!
//! Startup: configuration, driver bring-up, stabilization (zero reference),
//! control thread. Playback then feeds one line per `playback.line_delay_ms`
//! on the main thread.

use clap::Parser;
use gantry::app::{AppError, Gantry, load_config_or_default};
use gantry::logging::setup_tracing;
use gantry::sources::Playback;
use gantry_common::config::GantryConfig;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Gantry stage controller: G-code file playback
#[derive(Parser, Debug)]
#[command(name = "gantry")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Play a G-code file on the gantry stage and hold the final position")]
struct Args {
    /// G-code file to play.
    file: PathBuf,

    /// Path to configuration TOML (default: config/gantry.toml, or built-in defaults).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = load_config_or_default(args.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(args.verbose, args.json, level);

    info!("Gantry v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.map_err(AppError::from).and_then(|c| run(&args, c)) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: GantryConfig) -> Result<(), AppError> {
    let playback = Playback::from_config(&config.playback);
    let policy = config.playback.failure_policy.clone();

    let gantry = Gantry::start(config)?;
    let mut interp = gantry.interpreter(&policy)?;

    playback.run_file(&mut interp, &args.file)?;
    gantry.hold()
}
