//! Vehicle Data CLI Application
//!
//! A stand-in block host for the vehicle-data extension library. It adds:
//! - Registration metadata dump (the host's info call)
//! - Telemetry replay from JSON-lines notification files
//! - A tick scheduler polling the change hat block for watched fields
//! - Text report generation

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use vehicle_data::VehicleDataExtension;

mod config;
mod replay;
mod report;

use config::{check_ticks, parse_fields, AppConfig};
use replay::Replayer;

/// Vehicle Data - replay telemetry through the block extension
#[derive(Parser, Debug)]
#[command(name = "vehicle-data-cli")]
#[command(about = "Replay vehicle telemetry through the block extension", long_about = None)]
#[command(version)]
struct Args {
    /// JSON-lines file of telemetry notifications to replay
    #[arg(short, long, value_name = "FILE")]
    telemetry: Option<PathBuf>,

    /// Field whose change block is polled each tick (can be repeated)
    #[arg(short, long, value_name = "FIELD")]
    watch: Vec<String>,

    /// Scheduler ticks to run after each notification
    #[arg(long, value_name = "COUNT")]
    ticks_per_update: Option<usize>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the extension registration metadata as JSON and exit
    #[arg(long)]
    info: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Vehicle Data CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using extension library v{}", vehicle_data::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let extension = VehicleDataExtension::with_config(config.extension.clone());

    if args.info {
        let info = serde_json::to_string_pretty(&extension.info())?;
        println!("{}", info);
        return Ok(());
    }

    let Some(telemetry) = args.telemetry.clone().or(config.replay.telemetry.clone()) else {
        println!("Vehicle Data - No telemetry specified");
        println!("\nQuick Start:");
        println!("  vehicle-data-cli --telemetry drive.jsonl");
        println!("  vehicle-data-cli --telemetry drive.jsonl --watch speed --watch prndl");
        println!("  vehicle-data-cli --info");
        println!("\nUse --help for more options");
        return Ok(());
    };

    replay_mode(&args, &config, extension, telemetry)
}

/// Replay a telemetry file and write the change report
fn replay_mode(
    args: &Args,
    config: &AppConfig,
    extension: VehicleDataExtension,
    telemetry: PathBuf,
) -> Result<()> {
    let watched = if args.watch.is_empty() {
        config.replay.watched_fields()?
    } else {
        parse_fields(&args.watch)?
    };
    let ticks = check_ticks(
        args.ticks_per_update
            .or(config.replay.ticks_per_update)
            .unwrap_or(1),
    )?;

    log::info!(
        "Replaying {:?}: watching {} field(s), {} tick(s) per notification",
        telemetry,
        watched.len(),
        ticks
    );

    let file = File::open(&telemetry)
        .with_context(|| format!("Failed to open telemetry file: {:?}", telemetry))?;
    let started_at = chrono::Utc::now();
    let outcome = Replayer::new(extension, watched, ticks).replay(BufReader::new(file))?;

    log::info!(
        "Replay finished: {} notification(s), {} change edge(s)",
        outcome.notifications,
        outcome.edges.len()
    );

    let text = report::render_text(&outcome, started_at);
    match args.output.as_ref().or(config.output.file.as_ref()) {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            use std::io::Write;
            io::stdout().write_all(text.as_bytes())?;
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
