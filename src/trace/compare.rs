//! CSV trace parsing and MAPE scoring.

use crate::error::ToolError;
use crate::models::{Trace, TracePoint};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Parse CSV text into `(line, fields)` rows. Every field of every row is
/// parsed as a float; blank lines are skipped.
pub fn parse_rows(content: &str, path: &Path) -> Result<Vec<(usize, Vec<f64>)>, ToolError> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field.parse::<f64>().map_err(|_| ToolError::TraceParse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        rows.push((idx + 1, row));
    }

    Ok(rows)
}

/// Read a trace of (x, y) points from a CSV file.
pub fn read_trace(path: &Path) -> Result<Trace> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace: {}", path.display()))?;

    let mut trace = Trace::new();
    for (line, row) in parse_rows(&content, path)? {
        match row.as_slice() {
            [x, y] => trace.push(TracePoint::new(*x, *y)),
            other => {
                return Err(ToolError::TraceArity {
                    path: path.to_path_buf(),
                    line,
                    found: other.len(),
                }
                .into())
            }
        }
    }

    debug!("Read {} points from {}", trace.len(), path.display());
    Ok(trace)
}

/// Relative error of one component. A zero expected value falls back to
/// absolute error.
fn component_error(expected: f64, actual: f64) -> f64 {
    let denom = if expected != 0.0 { expected } else { 1.0 };
    (expected - actual).abs() / denom
}

/// Mean absolute percentage error over the common prefix of two traces.
pub fn mean_abs_percent_error(
    expected: &[TracePoint],
    actual: &[TracePoint],
) -> Result<f64, ToolError> {
    let errors: Vec<f64> = expected
        .iter()
        .zip(actual)
        .flat_map(|(e, a)| [component_error(e.x, a.x), component_error(e.y, a.y)])
        .collect();

    if errors.is_empty() {
        return Err(ToolError::EmptyTrace);
    }

    Ok(errors.iter().sum::<f64>() / errors.len() as f64 * 100.0)
}

/// Outcome of a trace comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Rows that were actually paired.
    pub compared_rows: usize,
    pub mape: f64,
}

impl Comparison {
    /// The line printed to stdout.
    pub fn summary_line(&self) -> String {
        format!("Mean absolute percentage error: {:.3}%", self.mape)
    }
}

/// Compare two traces, rejecting mismatched lengths unless `truncate` is set.
pub fn compare_traces(
    golden: &[TracePoint],
    replay: &[TracePoint],
    truncate: bool,
) -> Result<Comparison, ToolError> {
    if golden.len() != replay.len() {
        if !truncate {
            return Err(ToolError::LengthMismatch {
                golden: golden.len(),
                replay: replay.len(),
            });
        }
        warn!(
            "Trace lengths differ ({} vs {}), comparing the first {} rows",
            golden.len(),
            replay.len(),
            golden.len().min(replay.len())
        );
    }

    let mape = mean_abs_percent_error(golden, replay)?;
    Ok(Comparison {
        compared_rows: golden.len().min(replay.len()),
        mape,
    })
}
