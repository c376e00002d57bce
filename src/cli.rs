//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gctools - offline tooling for controller task reports
///
/// Compare replay traces against golden traces, build the wiring guide
/// from per-task reports, and look up task documents by id.
///
/// Examples:
///   gctools compare golden.csv replay.csv
///   gctools aggregate
///   gctools locate GC-001
///   gctools --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .gctools.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true, env = "GCTOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .gctools.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// The individual tools.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report the mean absolute percentage error between two traces
    Compare {
        /// CSV file of the golden legacy trace
        #[arg(value_name = "GOLDEN")]
        golden: PathBuf,

        /// CSV file produced by the plugin
        #[arg(value_name = "REPLAY")]
        replay: PathBuf,

        /// Compare only the common prefix when lengths differ
        #[arg(long)]
        truncate: bool,
    },

    /// Build WIRING_GUIDE.md from the GC-*.json task reports
    ///
    /// Exit code 3 when any report is missing required fields.
    Aggregate {
        /// Directory holding the reports and schema.json
        #[arg(long, value_name = "DIR")]
        reports_dir: Option<PathBuf>,

        /// Output file name inside the reports directory
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Print the document paths registered for a task id
    ///
    /// Exit code 2 when the id is not in the registry.
    Locate {
        /// Task identifier, matched case-insensitively
        #[arg(value_name = "ID")]
        id: String,

        /// Path to the task registry
        #[arg(long, value_name = "FILE")]
        registry: Option<PathBuf>,
    },
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// Usage errors exit with status 1; help and version exit with 0.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => match usage_exit_code(&e) {
                Some(code) => {
                    let _ = e.print();
                    std::process::exit(code);
                }
                None => e.exit(),
            },
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.init_config {
            if self.command.is_some() {
                return Err("--init-config cannot be combined with a subcommand".to_string());
            }
            return Ok(());
        }

        match &self.command {
            None => Err("A subcommand is required (compare, aggregate, locate)".to_string()),
            Some(Command::Locate { id, .. }) if id.trim().is_empty() => {
                Err("Task id must not be empty".to_string())
            }
            Some(Command::Aggregate {
                output: Some(output),
                ..
            }) if output.trim().is_empty() => Err("Output file name must not be empty".to_string()),
            Some(_) => Ok(()),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Exit status for a parse failure that is a real usage error.
///
/// Returns `None` for help and version output, which keep clap's own exit.
pub fn usage_exit_code(err: &clap::Error) -> Option<i32> {
    if err.use_stderr() {
        Some(1)
    } else {
        None
    }
}
