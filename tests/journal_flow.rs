//! End-to-end flows through the facade, on the in-memory gateway.

use daylog::api::DaylogApi;
use daylog::error::DaylogError;
use daylog::model::{Mood, RecordDraft};
use daylog::store::fs::FileGateway;
use daylog::store::memory::MemoryGateway;
use daylog::transfer::ExportFormat;
use serde_json::json;

fn api() -> DaylogApi<MemoryGateway> {
    DaylogApi::new(MemoryGateway::new())
}

fn draft(title: &str, date: &str) -> RecordDraft {
    RecordDraft {
        date: date.into(),
        title: title.into(),
        ..Default::default()
    }
}

#[test]
fn records_come_back_newest_first() {
    let mut api = api();
    api.submit_new(draft("First", "2024-01-01")).unwrap();
    api.submit_new(draft("Third", "2024-01-03")).unwrap();
    api.submit_new(draft("Second", "2024-01-02")).unwrap();

    let dates: Vec<String> = api.all().iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);
}

#[test]
fn add_undo_redo_preserves_field_values() {
    let mut api = api();
    let rec = api
        .submit_new(RecordDraft {
            date: "2024-06-01".into(),
            title: "Picnic".into(),
            content: "by the river".into(),
            mood: Mood::Happy,
            tags: vec!["food".into(), "outdoors".into()],
            ..Default::default()
        })
        .unwrap();
    let stored = api.find(&rec.id).unwrap().clone();

    api.undo().unwrap();
    assert!(api.find(&rec.id).is_none());

    api.redo().unwrap();
    assert_eq!(api.find(&rec.id), Some(&stored));
}

#[test]
fn import_scenario_with_duplicate_and_oversized_attachment() {
    let mut api = api();
    let existing = api.submit_new(draft("Existing", "2024-01-10")).unwrap();

    let payload = json!([
        { "id": existing.id, "date": "2024-01-10", "title": "Existing again" },
        { "id": "Y", "date": "2024-02-01", "title": "Fresh" },
        { "id": "Z", "date": "2024-02-02", "title": "Big image", "attachments": [{
            "name": "big.png", "type": "image/png",
            "size": 2 * 1024 * 1024,
            "dataUrl": "data:image/png;base64,AAAA"
        }]},
    ]);
    let report = api.import_json(&payload.to_string()).unwrap();

    assert_eq!(report.added, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.attachments_dropped, 1);
    assert_eq!(api.len(), 3);
    assert!(api.find("Z").unwrap().attachments.is_empty());
}

#[test]
fn import_rejects_non_array() {
    let mut api = api();
    assert!(matches!(
        api.import_json("{\"not\": \"an array\"}"),
        Err(DaylogError::ImportFormat(_))
    ));
}

#[test]
fn filter_and_cumulative_pagination_work_together() {
    let mut api = DaylogApi::with_page_size(MemoryGateway::new(), 2);
    for i in 0..5 {
        api.submit_new(RecordDraft {
            date: format!("2024-03-{:02}", i + 1),
            title: format!("Entry {i}"),
            tags: vec!["daily".into()],
            ..Default::default()
        })
        .unwrap();
    }
    api.submit_new(RecordDraft {
        date: "2024-03-10".into(),
        title: "Other".into(),
        ..Default::default()
    })
    .unwrap();

    api.toggle_tag_filter("daily");
    let first: Vec<_> = api.visible().into_iter().cloned().collect();
    assert_eq!(first.len(), 2);

    api.load_more();
    let second: Vec<_> = api.visible().into_iter().cloned().collect();
    assert_eq!(second.len(), 4);
    assert_eq!(&second[..2], &first[..]);

    api.load_more();
    assert_eq!(api.visible().len(), 5);
    assert!(!api.has_more());
}

#[test]
fn export_csv_has_header_and_counts() {
    let mut api = api();
    api.submit_new(draft("Plain", "2024-01-01")).unwrap();
    let csv = api.export(ExportFormat::Csv).unwrap();
    assert!(csv.starts_with("id,date,title,content,mood,tags,attachmentsCount"));
    assert!(csv.lines().last().unwrap().ends_with(",0"));
}

#[test]
fn quota_failure_leaves_store_and_file_consistent() {
    let dir = tempfile::TempDir::new().unwrap();
    let gateway = FileGateway::new(dir.path().to_path_buf()).with_quota(300);
    let mut api = DaylogApi::new(gateway);
    api.submit_new(draft("Small", "2024-01-01")).unwrap();

    let result = api.submit_new(RecordDraft {
        date: "2024-01-02".into(),
        title: "x".repeat(500),
        ..Default::default()
    });
    assert!(matches!(
        result,
        Err(DaylogError::StorageQuotaExceeded { .. })
    ));
    assert_eq!(api.len(), 1);

    // A fresh instance over the same file sees the same single record.
    let reopened = DaylogApi::new(FileGateway::new(dir.path().to_path_buf()));
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.all()[0].title, "Small");
}

#[test]
fn save_load_round_trip_canonicalizes() {
    let dir = tempfile::TempDir::new().unwrap();
    {
        let mut api = DaylogApi::new(FileGateway::new(dir.path().to_path_buf()));
        api.submit_new(RecordDraft {
            date: "2024-04-04".into(),
            title: "  padded  ".into(),
            tags: vec!["a".into(), "a".into()],
            ..Default::default()
        })
        .unwrap();
    }
    let api = DaylogApi::new(FileGateway::new(dir.path().to_path_buf()));
    assert_eq!(api.len(), 1);
    assert_eq!(api.all()[0].title, "padded");
    assert_eq!(api.all()[0].tags, vec!["a"]);
}
