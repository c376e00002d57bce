//! Markdown wiring guide generation.
//!
//! The guide is a list of lines joined with `\n`. Headings carry their own
//! trailing newline so that each is followed by a blank line, and lines
//! inside a section end in two spaces to force Markdown line breaks.

use crate::models::{display_scalar, FileEntry, ReportRecord};
use serde_json::Value;

/// Top-level heading of the guide.
pub const GUIDE_TITLE: &str = "# WIRING GUIDE\n";

/// Text used when a report has no wiring instructions.
pub const NOT_PROVIDED: &str = "(not provided)";

/// Text used for absent scalar fields.
pub const MISSING: &str = "(missing)";

/// Generate the complete guide for the given reports, in order.
pub fn generate_wiring_guide(records: &[ReportRecord]) -> String {
    let mut lines = vec![GUIDE_TITLE.to_string()];

    for record in records {
        lines.extend(generate_report_section(record));
    }

    lines.join("\n")
}

/// Generate the lines for one report.
pub fn generate_report_section(record: &ReportRecord) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "## {} — {}\n",
        scalar_or_missing(record.task_id.as_ref()),
        scalar_or_missing(record.title.as_ref())
    ));
    lines.push(format!(
        "**Component:** {}  ",
        scalar_or_missing(record.component.as_ref())
    ));

    let consulted = record.reference.as_ref().and_then(|r| r.consulted.as_ref());
    lines.push(format!(
        "**Reference consulted:** {}  ",
        scalar_or_missing(consulted)
    ));

    let reference_files = record.reference_files();
    if !reference_files.is_empty() {
        lines.push(format!(
            "**Reference files:** {}  ",
            reference_files.join(", ")
        ));
    }

    lines.push("### Wiring Instructions\n".to_string());
    lines.push(format!("{}\n", record.how_to_hook().unwrap_or(NOT_PROVIDED)));

    let files = record.files.as_deref().unwrap_or(&[]);
    if !files.is_empty() {
        lines.push("### Files\n".to_string());
        lines.extend(files.iter().map(generate_file_line));
    }

    lines.push(String::new());
    lines
}

/// One entry of the Files list.
fn generate_file_line(entry: &FileEntry) -> String {
    format!(
        "- `{}`  `{}`",
        or_missing(entry.path.as_deref()),
        entry.sha256.as_deref().unwrap_or("")
    )
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn scalar_or_missing(value: Option<&Value>) -> String {
    value.map_or_else(|| MISSING.to_string(), display_scalar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reference, Wiring};
    use serde_json::json;

    fn create_test_record() -> ReportRecord {
        ReportRecord {
            task_id: Some(json!("GC-001")),
            title: Some(json!("Legacy mouse aim")),
            version: Some(json!("1.0")),
            component: Some(json!("LegacyMouseAim")),
            reference: Some(Reference {
                consulted: Some(json!(true)),
                files: Some(vec![
                    "StickMapper.cs".to_string(),
                    "CurveProcessor.cs".to_string(),
                ]),
            }),
            files: Some(vec![
                FileEntry {
                    path: Some("plugins/LegacyMouseAim.cs".to_string()),
                    sha256: Some("abc123".to_string()),
                },
                FileEntry {
                    path: Some("plugins/ILegacyMouseAim.cs".to_string()),
                    sha256: None,
                },
            ]),
            wiring: Some(Wiring {
                how_to_hook: Some("Register the node in the mapping graph.".to_string()),
            }),
            results: None,
        }
    }

    #[test]
    fn test_generate_report_section_exact() {
        let section = generate_report_section(&create_test_record()).join("\n");
        let expected = "## GC-001 — Legacy mouse aim\n\n\
**Component:** LegacyMouseAim  \n\
**Reference consulted:** true  \n\
**Reference files:** StickMapper.cs, CurveProcessor.cs  \n\
### Wiring Instructions\n\n\
Register the node in the mapping graph.\n\n\
### Files\n\n\
- `plugins/LegacyMouseAim.cs`  `abc123`\n\
- `plugins/ILegacyMouseAim.cs`  ``\n";
        assert_eq!(section, expected);
    }

    #[test]
    fn test_placeholders_for_sparse_record() {
        let section = generate_report_section(&ReportRecord::default()).join("\n");

        assert!(section.starts_with("## (missing) — (missing)\n"));
        assert!(section.contains("**Component:** (missing)  "));
        assert!(section.contains("**Reference consulted:** (missing)  "));
        assert!(section.contains("(not provided)\n"));
        assert!(!section.contains("**Reference files:**"));
        assert!(!section.contains("### Files"));
    }

    #[test]
    fn test_non_string_scalars_render_as_json() {
        let mut record = create_test_record();
        record.task_id = Some(json!(2));
        record.reference = Some(Reference {
            consulted: Some(json!("yes")),
            files: None,
        });
        let section = generate_report_section(&record).join("\n");

        assert!(section.starts_with("## 2 — Legacy mouse aim\n"));
        assert!(section.contains("**Reference consulted:** yes  "));
    }

    #[test]
    fn test_empty_reference_files_are_omitted() {
        let mut record = create_test_record();
        record.reference = Some(Reference {
            consulted: Some(json!(false)),
            files: Some(Vec::new()),
        });
        let section = generate_report_section(&record).join("\n");

        assert!(section.contains("**Reference consulted:** false  "));
        assert!(!section.contains("**Reference files:**"));
    }

    #[test]
    fn test_generate_wiring_guide_order() {
        let mut second = create_test_record();
        second.task_id = Some(json!("GC-002"));
        let guide = generate_wiring_guide(&[create_test_record(), second]);

        assert!(guide.starts_with("# WIRING GUIDE\n\n## GC-001"));
        let first = guide.find("## GC-001").unwrap();
        let second = guide.find("## GC-002").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_guide() {
        assert_eq!(generate_wiring_guide(&[]), "# WIRING GUIDE\n");
    }
}
