//! Data models for task reports, the task registry and traces.
//!
//! Report fields are all optional so that a record missing required keys
//! can still be rendered with whatever it does carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Top-level keys every report must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "task_id",
    "title",
    "version",
    "component",
    "reference",
    "files",
    "wiring",
    "results",
];

/// Returns the required keys absent from a raw report object.
pub fn missing_fields(raw: &serde_json::Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !raw.contains_key(*key))
        .collect()
}

/// Render a JSON scalar for display: strings as-is, anything else as JSON.
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One task report (`GC-*.json`).
///
/// Displayed scalars are kept as raw JSON so a mistyped value still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRecord {
    pub task_id: Option<Value>,
    pub title: Option<Value>,
    /// Free-form; reports use both strings and numbers here.
    pub version: Option<Value>,
    pub component: Option<Value>,
    pub reference: Option<Reference>,
    pub files: Option<Vec<FileEntry>>,
    pub wiring: Option<Wiring>,
    pub results: Option<Value>,
}

impl ReportRecord {
    /// Reference files listed by the report, empty when absent.
    pub fn reference_files(&self) -> &[String] {
        self.reference
            .as_ref()
            .and_then(|r| r.files.as_deref())
            .unwrap_or(&[])
    }

    /// Wiring instructions text, if the report provides any.
    pub fn how_to_hook(&self) -> Option<&str> {
        self.wiring.as_ref().and_then(|w| w.how_to_hook.as_deref())
    }
}

/// Which reference material was consulted for the task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reference {
    /// Normally a boolean.
    pub consulted: Option<Value>,
    pub files: Option<Vec<String>>,
}

/// A file touched by the task, optionally with its checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: Option<String>,
    pub sha256: Option<String>,
}

/// How to hook the component into the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wiring {
    pub how_to_hook: Option<String>,
}

/// One row of `agents/registry.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    /// Path to the human-readable task document.
    pub md: String,
    /// Path to the machine-readable task document.
    pub json: String,
}

/// A single (x, y) sample of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
}

impl TracePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TracePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An ordered sequence of trace samples.
pub type Trace = Vec<TracePoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_in_required_order() {
        let raw = json!({
            "task_id": "GC-001",
            "version": 1,
            "reference": {},
            "wiring": {},
        });
        let missing = missing_fields(raw.as_object().unwrap());
        assert_eq!(missing, vec!["title", "component", "files", "results"]);
    }

    #[test]
    fn test_complete_report_has_no_missing_fields() {
        let raw = json!({
            "task_id": "GC-001",
            "title": "Mouse aim",
            "version": "1.0",
            "component": "plugin",
            "reference": {"consulted": true},
            "files": [],
            "wiring": {},
            "results": null,
        });
        assert!(missing_fields(raw.as_object().unwrap()).is_empty());
    }

    #[test]
    fn test_report_record_accessors() {
        let record: ReportRecord = serde_json::from_value(json!({
            "reference": {"consulted": false, "files": ["a.cs", "b.cs"]},
            "wiring": {"how_to_hook": "Register the node."},
        }))
        .unwrap();
        assert_eq!(record.reference_files(), ["a.cs", "b.cs"]);
        assert_eq!(record.how_to_hook(), Some("Register the node."));

        let empty = ReportRecord::default();
        assert!(empty.reference_files().is_empty());
        assert_eq!(empty.how_to_hook(), None);
    }

    #[test]
    fn test_mistyped_scalars_still_deserialize() {
        let record: ReportRecord = serde_json::from_value(json!({
            "task_id": 2,
            "title": null,
            "component": ["a", "b"],
            "reference": {"consulted": "yes"},
        }))
        .unwrap();
        assert_eq!(record.task_id, Some(json!(2)));
        assert_eq!(record.title, None);
        assert_eq!(
            record.reference.and_then(|r| r.consulted),
            Some(json!("yes"))
        );
        assert_eq!(display_scalar(&record.component.unwrap()), r#"["a","b"]"#);
    }

    #[test]
    fn test_display_scalar() {
        assert_eq!(display_scalar(&json!("GC-001")), "GC-001");
        assert_eq!(display_scalar(&json!(7)), "7");
        assert_eq!(display_scalar(&json!(true)), "true");
    }

    #[test]
    fn test_trace_point_display() {
        assert_eq!(TracePoint::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
