//! Task registry lookup.
//!
//! Entries are typed one at a time while scanning. Only the entries up to
//! the first match need a string `id`, and only the match itself needs
//! `md` and `json`; anything after it is never inspected.

use crate::error::ToolError;
use crate::models::RegistryEntry;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct EntryId {
    id: String,
}

/// Load the registry array from disk, leaving entries untyped.
pub fn load_registry(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry: {}", path.display()))?;

    let entries: Vec<Value> =
        serde_json::from_str(&content).map_err(|source| ToolError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} registry entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// First entry whose id matches `id` ignoring case.
pub fn find_task(entries: &[Value], id: &str) -> Result<Option<RegistryEntry>, ToolError> {
    let id = id.trim();

    for (index, value) in entries.iter().enumerate() {
        let malformed = |source| ToolError::RegistryEntry { index, source };

        let candidate = EntryId::deserialize(value).map_err(malformed)?;
        if candidate.id.to_lowercase() != id.to_lowercase() {
            continue;
        }

        let entry = RegistryEntry::deserialize(value).map_err(malformed)?;
        debug!("Matched registry entry {} ({})", index, entry.id);
        return Ok(Some(entry));
    }

    Ok(None)
}

/// Lines printed for a located task.
pub fn describe(entry: &RegistryEntry) -> [String; 2] {
    [
        format!("Markdown: {}", entry.md),
        format!("Machine: {}", entry.json),
    ]
}

/// Message printed when no entry matches.
pub fn not_found_message(id: &str) -> String {
    format!("Task not found: {}", id.trim())
}
