//! Turning untrusted data into valid [`Record`]s.
//!
//! Two deliberately separate policies live here:
//!
//! - [`normalize`]: the lenient path for load and import. Total: it never
//!   errors, it coerces or drops. Anything that is a JSON object becomes a
//!   valid record with defaults filled in; anything else is rejected with
//!   `None`.
//! - [`validate_submission`]: the strict path for explicit user edits. A
//!   missing date or empty title is a [`DaylogError::Validation`] the caller
//!   must re-prompt on.
//!
//! Do not unify them: legacy data deserves repair, user input deserves an
//! error message.

use crate::error::{DaylogError, Result};
use crate::model::{fresh_id, today, Attachment, Mood, Record, RecordDraft};
use chrono::NaiveDate;
use serde_json::Value;

/// Hard cap on a single embedded image: 1 MiB.
pub const MAX_ATTACHMENT_BYTES: u64 = 1024 * 1024;

/// Coerce an arbitrary JSON value into a valid record.
///
/// Returns `None` iff `raw` is not an object. The output always satisfies
/// the store invariants: valid date (defaulted to today), known mood
/// (defaulted), trimmed title, deduplicated non-empty tags, and only
/// attachments passing [`is_valid_attachment`].
pub fn normalize(raw: &Value) -> Option<Record> {
    normalize_counting(raw).map(|(record, _)| record)
}

/// Like [`normalize`], but also reports how many attachments were dropped
/// for declaring a size over [`MAX_ATTACHMENT_BYTES`]. Import uses the count.
pub fn normalize_counting(raw: &Value) -> Option<(Record, usize)> {
    let obj = raw.as_object()?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fresh_id(),
    };

    let date = obj
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_strict_date)
        .unwrap_or_else(today);

    let title = coerce_string(obj.get("title")).trim().to_string();
    let content = coerce_string(obj.get("content"));

    let mood = obj
        .get("mood")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Mood>().ok())
        .unwrap_or_default();

    let tags = match obj.get("tags") {
        Some(Value::Array(items)) => {
            dedup_tags(items.iter().map(|v| coerce_string(Some(v))))
        }
        _ => Vec::new(),
    };

    let mut oversized = 0;
    let attachments = match obj.get("attachments") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let att: Attachment = serde_json::from_value(item.clone()).ok()?;
                if !is_image_data_url(&att.data_url) {
                    return None;
                }
                if att.size.is_some_and(|s| s > MAX_ATTACHMENT_BYTES) {
                    oversized += 1;
                    return None;
                }
                Some(att)
            })
            .collect(),
        _ => Vec::new(),
    };

    let record = Record {
        id,
        date,
        title,
        content,
        mood,
        tags,
        attachments,
    };
    Some((record, oversized))
}

/// Validate an explicit user submission.
///
/// Stricter than [`normalize`]: the date must parse and the title must be
/// non-empty after trimming. Tags and attachments are canonicalized the same
/// way the lenient path does.
pub fn validate_submission(draft: &RecordDraft) -> Result<Record> {
    let date = parse_strict_date(draft.date.trim()).ok_or_else(|| {
        DaylogError::validation("date", format!("expected YYYY-MM-DD, got {:?}", draft.date))
    })?;

    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(DaylogError::validation("title", "title is required"));
    }

    let id = match &draft.id {
        Some(id) if !id.is_empty() => id.clone(),
        _ => fresh_id(),
    };

    Ok(Record {
        id,
        date,
        title,
        content: draft.content.clone(),
        mood: draft.mood,
        tags: dedup_tags(draft.tags.iter().cloned()),
        attachments: draft
            .attachments
            .iter()
            .filter(|a| is_valid_attachment(a))
            .cloned()
            .collect(),
    })
}

/// An attachment is storable iff it is an inline base64 image with any
/// declared size within the cap.
pub fn is_valid_attachment(att: &Attachment) -> bool {
    is_image_data_url(&att.data_url) && !att.size.is_some_and(|s| s > MAX_ATTACHMENT_BYTES)
}

/// Check the `data:image/<subtype>;base64,<payload>` shape, non-empty payload.
fn is_image_data_url(data_url: &str) -> bool {
    let Some(rest) = data_url.strip_prefix("data:image/") else {
        return false;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        && !payload.is_empty()
}

/// Strict `YYYY-MM-DD`: exact digit layout, then a real calendar date.
/// Rejects both `2024-1-1` (shape) and `2024-13-40` (calendar).
fn parse_strict_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn dedup_tags<I: Iterator<Item = String>>(tags: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
