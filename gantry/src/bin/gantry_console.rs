//! # Gantry Console
//!
//! Interactive targets from standard input: `X Y` in millimeters, or a G-code
//! line. End of input leaves the stage holding its last targets.

use clap::Parser;
use gantry::app::{AppError, Gantry, load_config_or_default};
use gantry::logging::setup_tracing;
use gantry::sources::Console;
use gantry_common::config::GantryConfig;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

/// Gantry stage controller: interactive console
#[derive(Parser, Debug)]
#[command(name = "gantry_console")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Type target positions or G-code for the gantry stage")]
struct Args {
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

    info!("Gantry console v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.map_err(AppError::from).and_then(run) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(config: GantryConfig) -> Result<(), AppError> {
    let policy = config.console.failure_policy.clone();
    let gantry = Gantry::start(config)?;
    let interp = gantry.interpreter(&policy)?;
    let mut console = Console::new(Arc::clone(gantry.targets()), interp);

    info!("Enter target 'X Y' [mm] or a G-code line; end input with Ctrl-D");
    console
        .run(io::stdin().lock())
        .map_err(|source| AppError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    gantry.hold()
}
