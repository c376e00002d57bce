//! Domain errors.
//!
//! Boundary code wraps these in `anyhow` with extra context; the variants
//! here carry enough detail to point at the offending input.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading inputs or computing results.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A CSV field could not be parsed as a float.
    #[error("{path}:{line}: invalid number '{field}'")]
    TraceParse {
        path: PathBuf,
        line: usize,
        field: String,
    },

    /// A CSV row is not an (x, y) pair.
    #[error("{path}:{line}: expected 2 fields, found {found}")]
    TraceArity {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// Golden and replay traces differ in length.
    #[error("trace length mismatch: golden has {golden} rows, replay has {replay} (use --truncate to compare the common prefix)")]
    LengthMismatch { golden: usize, replay: usize },

    /// There were no rows to compare.
    #[error("no rows to compare")]
    EmptyTrace,

    /// A JSON input did not have the expected shape.
    #[error("failed to decode {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A registry entry scanned during lookup lacks a string field.
    #[error("registry entry {index} is malformed")]
    RegistryEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A report file's top level is not a JSON object.
    #[error("{0}: report must be a JSON object")]
    NotAnObject(PathBuf),
}
