//! Report file discovery.
//!
//! Finds the report files in a reports directory whose names match a
//! single-wildcard pattern such as `GC-*.json`, in a deterministic order.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for report discovery.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File name pattern; `*` matches any run of characters.
    pub pattern: String,
    /// File names never treated as reports even if they match.
    pub excludes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: "GC-*.json".to_string(),
            excludes: vec!["schema.json".to_string()],
        }
    }
}

impl From<&crate::config::AggregateConfig> for ScanConfig {
    fn from(config: &crate::config::AggregateConfig) -> Self {
        Self {
            pattern: config.pattern.clone(),
            excludes: vec![config.schema_file.clone()],
        }
    }
}

/// Match a file name against a pattern with at most one `*` wildcard.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == name,
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
    }
}

/// Scanner for report files in one directory.
pub struct ReportScanner {
    config: ScanConfig,
    reports_dir: PathBuf,
}

impl ReportScanner {
    /// Create a new scanner over `reports_dir`.
    pub fn new(reports_dir: PathBuf, config: ScanConfig) -> Self {
        Self {
            config,
            reports_dir,
        }
    }

    /// Directory being scanned.
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Check if a file name is a report.
    pub fn matches(&self, name: &str) -> bool {
        !self.config.excludes.iter().any(|e| e == name)
            && matches_pattern(&self.config.pattern, name)
    }

    /// List matching report files, sorted by file name.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut reports = Vec::new();

        let walker = WalkDir::new(&self.reports_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Failed to list {}", self.reports_dir.display())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.matches(&name) {
                reports.push(entry.into_path());
            } else {
                debug!("Skipping {}", name);
            }
        }

        Ok(reports)
    }
}
