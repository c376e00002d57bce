//! Report loading, validation and checksum backfill.
//!
//! Missing required fields are collected per report rather than aborting
//! the run; every report is still rendered into the guide.

use crate::checksum::sha256_file;
use crate::config::AggregateConfig;
use crate::error::ToolError;
use crate::models::{missing_fields, ReportRecord};
use crate::report::generator::generate_wiring_guide;
use crate::scanner::{ReportScanner, ScanConfig};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A report that lacks required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidReport {
    pub path: PathBuf,
    pub missing: Vec<&'static str>,
}

impl InvalidReport {
    /// The diagnostic printed for this report.
    pub fn diagnostic(&self) -> String {
        format!(
            "Missing fields in {}: {}",
            self.path.display(),
            self.missing.join(", ")
        )
    }
}

/// A parsed report and its validation result.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub path: PathBuf,
    pub record: ReportRecord,
    pub missing: Vec<&'static str>,
}

/// Result of a full aggregation run.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Where the guide was written.
    pub output_path: PathBuf,
    /// Number of reports rendered.
    pub reports: usize,
    /// Number of checksums computed from disk.
    pub checksums_computed: usize,
    pub invalid: Vec<InvalidReport>,
}

impl Aggregation {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Load a report, recording which required fields are absent.
pub fn load_report(path: &Path) -> Result<LoadedReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;

    let raw: Value = serde_json::from_str(&content).map_err(|source| ToolError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let missing = match raw.as_object() {
        Some(object) => missing_fields(object),
        None => return Err(ToolError::NotAnObject(path.to_path_buf()).into()),
    };

    let record: ReportRecord =
        serde_json::from_value(raw).map_err(|source| ToolError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(LoadedReport {
        path: path.to_path_buf(),
        record,
        missing,
    })
}

/// Load the schema descriptor. Its content only needs to be valid JSON.
pub fn load_schema(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;

    let schema: Value = serde_json::from_str(&content).map_err(|source| ToolError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(title) = schema.get("title").and_then(Value::as_str) {
        debug!("Loaded schema '{}' from {}", title, path.display());
    } else {
        debug!("Loaded schema from {}", path.display());
    }

    Ok(schema)
}

/// Compute `sha256` for file entries that exist under `artifact_root` and
/// lack one. Only the in-memory record is updated. Returns how many
/// checksums were computed.
pub fn fill_checksums(record: &mut ReportRecord, artifact_root: &Path) -> Result<usize> {
    let mut computed = 0;

    for entry in record.files.iter_mut().flatten() {
        let Some(path) = entry.path.as_deref().filter(|p| !p.is_empty()) else {
            continue;
        };
        if entry.sha256.as_deref().is_some_and(|h| !h.is_empty()) {
            continue;
        }

        let full_path = artifact_root.join(path);
        if !full_path.is_file() {
            debug!("No file at {}, leaving checksum empty", full_path.display());
            continue;
        }

        entry.sha256 = Some(sha256_file(&full_path)?);
        computed += 1;
    }

    Ok(computed)
}

/// Builds the wiring guide from a reports directory.
pub struct Aggregator {
    config: AggregateConfig,
}

impl Aggregator {
    pub fn new(config: AggregateConfig) -> Self {
        Self { config }
    }

    /// Validate every report, render the guide and write it out.
    ///
    /// Diagnostics for invalid reports are printed as they are found.
    pub fn run(&self) -> Result<Aggregation> {
        let reports_dir = &self.config.reports_dir;
        std::fs::create_dir_all(reports_dir).with_context(|| {
            format!("Failed to create reports directory: {}", reports_dir.display())
        })?;

        load_schema(&self.config.schema_path())?;

        let scanner = ReportScanner::new(reports_dir.clone(), ScanConfig::from(&self.config));
        let paths = scanner.scan()?;
        info!(
            "Found {} report(s) in {}",
            paths.len(),
            scanner.reports_dir().display()
        );

        let mut records = Vec::with_capacity(paths.len());
        let mut invalid = Vec::new();
        let mut checksums_computed = 0;

        for path in &paths {
            let LoadedReport {
                path,
                mut record,
                missing,
            } = load_report(path)?;

            if !missing.is_empty() {
                let report = InvalidReport { path, missing };
                println!("{}", report.diagnostic());
                warn!("{} is missing {} field(s)", report.path.display(), report.missing.len());
                invalid.push(report);
            }

            checksums_computed += fill_checksums(&mut record, &self.config.artifact_root)?;
            records.push(record);
        }

        let guide = generate_wiring_guide(&records);
        let output_path = self.config.output_path();
        std::fs::write(&output_path, guide)
            .with_context(|| format!("Failed to write guide to {}", output_path.display()))?;

        info!("Rendered {} report(s), {} invalid", records.len(), invalid.len());

        Ok(Aggregation {
            output_path,
            reports: records.len(),
            checksums_computed,
            invalid,
        })
    }
}
