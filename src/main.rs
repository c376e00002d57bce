//! gctools - offline tooling for controller task reports
//!
//! Subcommands:
//!   compare    MAPE between a golden and a replay trace
//!   aggregate  build reports/WIRING_GUIDE.md from GC-*.json reports
//!   locate     print the documents registered for a task id
//!
//! Exit codes:
//!   0 - Success
//!   1 - Usage or runtime error (bad arguments, unreadable/malformed input)
//!   2 - Task id not found in the registry (locate)
//!   3 - One or more reports are missing required fields (aggregate)

mod checksum;
mod cli;
mod config;
mod error;
mod locator;
mod models;
mod report;
mod scanner;
mod trace;

use anyhow::{Context, Result};
use cli::{Args, Command};
use config::{Config, CONFIG_FILE};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit code when a task id is not registered.
const EXIT_NOT_FOUND: i32 = 2;

/// Exit code when any report fails validation.
const EXIT_INVALID_REPORTS: i32 = 3;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    init_logging(&args);

    debug!("gctools v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(&args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .gctools.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        anyhow::bail!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Dispatch the selected subcommand. Returns the process exit code.
fn run(args: &Args) -> Result<i32> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    match &args.command {
        Some(Command::Compare { golden, replay, .. }) => {
            run_compare(golden, replay, config.compare.truncate)
        }
        Some(Command::Aggregate { .. }) => run_aggregate(config.aggregate),
        Some(Command::Locate { id, .. }) => run_locate(id, &config.locate.registry),
        None => anyhow::bail!("A subcommand is required"),
    }
}

/// Print the MAPE between two trace files.
fn run_compare(golden: &Path, replay: &Path, truncate: bool) -> Result<i32> {
    let golden_trace = trace::read_trace(golden)?;
    let replay_trace = trace::read_trace(replay)?;

    let comparison = trace::compare_traces(&golden_trace, &replay_trace, truncate)?;
    info!("Compared {} row(s)", comparison.compared_rows);

    println!("{}", comparison.summary_line());
    Ok(0)
}

/// Build the wiring guide. Returns 3 when any report is invalid.
fn run_aggregate(config: config::AggregateConfig) -> Result<i32> {
    let aggregation = report::Aggregator::new(config).run()?;
    info!(
        "Wiring guide for {} report(s) written to {} ({} checksum(s) computed)",
        aggregation.reports,
        aggregation.output_path.display(),
        aggregation.checksums_computed
    );

    if aggregation.is_valid() {
        Ok(0)
    } else {
        Ok(EXIT_INVALID_REPORTS)
    }
}

/// Print the registered documents for a task. Returns 2 when not found.
fn run_locate(id: &str, registry: &Path) -> Result<i32> {
    let entries = locator::load_registry(registry)?;

    match locator::find_task(&entries, id)? {
        Some(entry) => {
            for line in locator::describe(&entry) {
                println!("{}", line);
            }
            Ok(0)
        }
        None => {
            println!("{}", locator::not_found_message(id));
            Ok(EXIT_NOT_FOUND)
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            debug!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
