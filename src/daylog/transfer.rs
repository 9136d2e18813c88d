//! Bulk import and export of the record sequence.
//!
//! Import accepts a JSON array of record-like objects, runs each through the
//! lenient normalizer, skips ids already in the store, strips oversized
//! attachments, and persists the accepted batch in one step. Export is
//! either a full-fidelity JSON dump or a flat CSV without attachment
//! payloads.

use crate::error::{DaylogError, Result};
use crate::journal::Journal;
use crate::model::Record;
use crate::normalize;
use crate::store::StorageGateway;
use serde_json::Value;
use std::collections::BTreeSet;

/// What an import did, for the caller to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records appended to the store.
    pub added: usize,
    /// Records skipped because their id already existed.
    pub skipped: usize,
    /// Attachments stripped for declaring a size over 1 MiB.
    pub attachments_dropped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Import a JSON payload. The top level must be an array; elements that are
/// not objects are dropped silently, matching the lenient load path. The
/// whole batch persists in one step and rolls back together on failure.
pub fn import_json<G: StorageGateway>(
    journal: &mut Journal<G>,
    text: &str,
) -> Result<ImportReport> {
    let parsed: Value = serde_json::from_str(text)?;
    let Value::Array(items) = parsed else {
        return Err(DaylogError::ImportFormat(
            "top level must be an array of records".into(),
        ));
    };

    let mut seen: BTreeSet<String> = journal.all().iter().map(|r| r.id.clone()).collect();
    let mut report = ImportReport::default();
    let mut accepted = Vec::new();

    for item in &items {
        let Some((record, oversized)) = normalize::normalize_counting(item) else {
            continue;
        };
        if seen.contains(&record.id) {
            report.skipped += 1;
            continue;
        }
        report.attachments_dropped += oversized;
        seen.insert(record.id.clone());
        accepted.push(record);
        report.added += 1;
    }

    journal.insert_batch(accepted)?;
    Ok(report)
}

pub fn export(records: &[Record], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(records),
        ExportFormat::Csv => Ok(export_csv(records)),
    }
}

/// Full-fidelity dump, attachments included.
pub fn export_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Flat tabular form. Attachment payloads are excluded; only their count
/// survives.
pub fn export_csv(records: &[Record]) -> String {
    let mut lines = vec!["id,date,title,content,mood,tags,attachmentsCount".to_string()];
    for r in records {
        lines.push(
            [
                r.id.clone(),
                r.date.to_string(),
                escape_csv(&r.title),
                escape_csv(&r.content),
                r.mood.to_string(),
                escape_csv(&r.tags.join(";")),
                r.attachments.len().to_string(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

/// Quote a cell when it contains a comma, quote, or newline; inner quotes
/// are doubled.
fn escape_csv(s: &str) -> String {
    if s.contains(['"', ',', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryGateway;
    use serde_json::json;

    fn journal() -> Journal<MemoryGateway> {
        Journal::open(MemoryGateway::new())
    }

    #[test]
    fn rejects_non_array_top_level() {
        let mut j = journal();
        match import_json(&mut j, "{\"id\": \"a\"}") {
            Err(DaylogError::ImportFormat(_)) => {}
            other => panic!("expected ImportFormat, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let mut j = journal();
        assert!(matches!(
            import_json(&mut j, "not json"),
            Err(DaylogError::Serialization(_))
        ));
    }

    #[test]
    fn skips_duplicates_and_strips_oversized_attachments() {
        let mut j = journal();
        j.add(&json!({ "id": "X", "date": "2024-01-15", "title": "Existing" }))
            .unwrap();

        let payload = json!([
            { "id": "X", "date": "2024-01-15", "title": "Existing again" },
            { "id": "Y", "date": "2024-02-01", "title": "New entry" },
            { "id": "Z", "date": "2024-02-02", "title": "With big image", "attachments": [{
                "name": "big.png", "type": "image/png",
                "size": 2 * 1024 * 1024,
                "dataUrl": "data:image/png;base64,AAAA"
            }]},
        ]);
        let report = import_json(&mut j, &payload.to_string()).unwrap();

        assert_eq!(
            report,
            ImportReport {
                added: 2,
                skipped: 1,
                attachments_dropped: 1,
            }
        );
        assert_eq!(j.len(), 3);
        assert_eq!(j.find("X").unwrap().title, "Existing");
        assert!(j.find("Z").unwrap().attachments.is_empty());
        // Re-sorted by descending date after the batch.
        let ids: Vec<&str> = j.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "Y", "X"]);
    }

    #[test]
    fn non_object_elements_are_dropped_silently() {
        let mut j = journal();
        let report = import_json(&mut j, "[1, \"two\", null, {\"id\": \"a\"}]").unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn import_quota_failure_rolls_back_the_batch() {
        let mut j = Journal::open(MemoryGateway::with_capacity(150));
        j.add(&json!({ "id": "a", "date": "2024-01-01", "title": "A" }))
            .unwrap();
        let payload = json!([
            { "id": "b", "date": "2024-01-02", "title": "x".repeat(400) },
        ]);
        assert!(matches!(
            import_json(&mut j, &payload.to_string()),
            Err(DaylogError::StorageQuotaExceeded { .. })
        ));
        assert_eq!(j.len(), 1);
    }

    #[test]
    fn json_export_round_trips() {
        let mut j = journal();
        j.add(&json!({ "id": "a", "date": "2024-01-01", "title": "A", "tags": ["t"] }))
            .unwrap();
        let dump = export_json(j.all()).unwrap();
        let reloaded: Vec<Record> = serde_json::from_str(&dump).unwrap();
        assert_eq!(reloaded, j.all());
    }

    #[test]
    fn csv_escapes_commas_quotes_and_newlines() {
        let mut j = journal();
        j.add(&json!({
            "id": "a",
            "date": "2024-01-01",
            "title": "Hello, \"world\"",
            "content": "line1\nline2",
            "tags": ["x", "y"],
        }))
        .unwrap();
        let csv = export_csv(j.all());
        let mut lines = csv.splitn(2, '\n');
        assert_eq!(
            lines.next().unwrap(),
            "id,date,title,content,mood,tags,attachmentsCount"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("a,2024-01-01,\"Hello, \"\"world\"\"\",\"line1\nline2\",okay,x;y,0"));
    }

    #[test]
    fn csv_excludes_attachment_payloads() {
        let mut j = journal();
        j.add(&json!({
            "id": "a", "date": "2024-01-01", "title": "T",
            "attachments": [{
                "name": "p.png", "type": "image/png", "size": 4,
                "dataUrl": "data:image/png;base64,SECRETPAYLOAD"
            }],
        }))
        .unwrap();
        let csv = export_csv(j.all());
        assert!(!csv.contains("SECRETPAYLOAD"));
        assert!(csv.ends_with(",1"));
    }
}
