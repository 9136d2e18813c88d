use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The closed set of moods a record can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Okay,
    Down,
    Anxious,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Okay,
        Mood::Down,
        Mood::Anxious,
        Mood::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Okay => "okay",
            Mood::Down => "down",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

/// An embedded image, stored inline as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    /// MIME type as declared by the caller (e.g. `image/png`).
    #[serde(rename = "type", default)]
    pub mime: String,
    /// Declared byte size. Optional in legacy payloads.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// A dated journal entry. The canonical unit the whole crate operates on.
///
/// Cloning a record deep-copies its tags and attachments, so snapshots taken
/// for the action log never alias the live sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Record {
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: fresh_id(),
            date: today(),
            title,
            content,
            mood: Mood::default(),
            tags: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

/// An explicit user submission, before strict validation.
///
/// Unlike the lenient [`crate::normalize::normalize`] path used for loading
/// and importing, a draft must carry a parseable date and a non-empty title
/// to become a [`Record`].
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    /// Existing id when editing; `None` means a fresh one is assigned.
    pub id: Option<String>,
    pub date: String,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub attachments: Vec<Attachment>,
}

pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_round_trips_through_str() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Anxious).unwrap(), "\"anxious\"");
        let mood: Mood = serde_json::from_str("\"tired\"").unwrap();
        assert_eq!(mood, Mood::Tired);
    }

    #[test]
    fn record_date_serializes_as_iso_string() {
        let mut rec = Record::new("Title".into(), "".into());
        rec.date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["date"], "2024-03-09");
    }

    #[test]
    fn attachment_uses_storage_field_names() {
        let att = Attachment {
            name: "pic.png".into(),
            mime: "image/png".into(),
            size: Some(42),
            data_url: "data:image/png;base64,AAAA".into(),
        };
        let json = serde_json::to_value(&att).unwrap();
        assert_eq!(json["type"], "image/png");
        assert_eq!(json["dataUrl"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn clone_is_deep_for_nested_collections() {
        let mut rec = Record::new("Title".into(), "".into());
        rec.tags = vec!["a".into()];
        let snapshot = rec.clone();
        rec.tags.push("b".into());
        assert_eq!(snapshot.tags, vec!["a".to_string()]);
    }
}
