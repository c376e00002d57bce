//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.gctools.toml` files.

use crate::cli::{Args, Command};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".gctools.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Trace comparison settings.
    #[serde(default)]
    pub compare: CompareConfig,

    /// Wiring guide aggregation settings.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Task lookup settings.
    #[serde(default)]
    pub locate: LocateConfig,
}

/// Trace comparison settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Compare only the common prefix when trace lengths differ.
    #[serde(default)]
    pub truncate: bool,
}

/// Report aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Directory holding `GC-*.json` reports and `schema.json`.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Schema descriptor file name inside the reports directory.
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Report file name pattern.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Output file name inside the reports directory.
    #[serde(default = "default_output")]
    pub output: String,

    /// Base directory for resolving `files[].path` entries.
    #[serde(default = "default_artifact_root")]
    pub artifact_root: PathBuf,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            schema_file: default_schema_file(),
            pattern: default_pattern(),
            output: default_output(),
            artifact_root: default_artifact_root(),
        }
    }
}

impl AggregateConfig {
    /// Full path of the schema descriptor.
    pub fn schema_path(&self) -> PathBuf {
        self.reports_dir.join(&self.schema_file)
    }

    /// Full path of the generated guide.
    pub fn output_path(&self) -> PathBuf {
        self.reports_dir.join(&self.output)
    }
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_schema_file() -> String {
    "schema.json".to_string()
}

fn default_pattern() -> String {
    "GC-*.json".to_string()
}

fn default_output() -> String {
    "WIRING_GUIDE.md".to_string()
}

fn default_artifact_root() -> PathBuf {
    PathBuf::from(".")
}

/// Task lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateConfig {
    /// Path to the task registry.
    #[serde(default = "default_registry")]
    pub registry: PathBuf,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
        }
    }
}

fn default_registry() -> PathBuf {
    Path::new("agents").join("registry.json")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user passed explicitly override the file.
    pub fn merge_with_args(&mut self, args: &Args) {
        match &args.command {
            Some(Command::Compare { truncate, .. }) => {
                if *truncate {
                    self.compare.truncate = true;
                }
            }
            Some(Command::Aggregate {
                reports_dir,
                output,
            }) => {
                if let Some(dir) = reports_dir {
                    self.aggregate.reports_dir = dir.clone();
                }
                if let Some(output) = output {
                    self.aggregate.output = output.clone();
                }
            }
            Some(Command::Locate { registry, .. }) => {
                if let Some(registry) = registry {
                    self.locate.registry = registry.clone();
                }
            }
            None => {}
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
