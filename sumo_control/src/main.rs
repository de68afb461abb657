//! # Sumo Control
//!
//! Boundary-keeping control loop for a two-wheeled sumo robot.
//!
//! Startup order: load + validate the TOML config, create the configured
//! board driver, claim every line, install the ctrl-c handler, play the
//! startup chime, log one diagnostic range reading, then enter the
//! boundary-avoidance loop until the shutdown flag clears.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use sumo_common::config::load_config;
use sumo_common::consts::DEFAULT_CONFIG_PATH;
use sumo_control::{AvoidanceStrategy, BoundaryScanner, MotorDrive, RangeFinder, StartupChime};
use sumo_hal::drivers::default_registry;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Sumo Control — boundary-keeping robot loop
#[derive(Parser, Debug)]
#[command(name = "sumo_control")]
#[command(version)]
#[command(about = "Boundary-keeping control loop for a two-wheeled sumo robot")]
struct Args {
    /// Path to the robot configuration TOML.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the board driver named in the config (e.g. "simulation").
    #[arg(long)]
    driver: Option<String>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Sumo Control v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Sumo Control shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    if let Some(driver) = &args.driver {
        config.driver = driver.clone();
    }
    info!(
        "Config OK: driver={}, poll_interval={}ms, turn_hold={}ms, reverse_hold={}ms",
        config.driver,
        config.poll_interval_ms,
        config.recovery.turn_hold_ms,
        config.recovery.reverse_hold_ms,
    );

    let registry = default_registry();
    let mut board = registry.create_board(&config.driver)?;
    info!("Board '{}' ready", board.name());

    // Claim every line up front; a bad pin map fails here, before motion.
    let drive = MotorDrive::new(board.as_mut(), &config.pins)?;
    let scanner = BoundaryScanner::new(board.as_mut(), &config)?;
    let mut range = RangeFinder::new(board.as_mut(), &config)?;
    let mut chime = StartupChime::new(board.as_mut(), &config.pins)?;

    // Graceful shutdown on ctrl-c.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    chime.play();

    match range.measure() {
        Some(distance) => info!("Forward clearance at startup: {distance}"),
        None => info!("No echo from range sensor at startup"),
    }

    let mut strategy = AvoidanceStrategy::new(drive, scanner, board.pacer(), &config);
    strategy.run(&running);

    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
