use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color applied to notes stored before the picker existed.
pub const DEFAULT_COLOR: &str = "#fff8dc";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A freeform annotation pinned to a calendar date, independent of tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    pub id: Uuid,
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub created_at: NaiveDateTime,
}

impl StickyNote {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            color: color.into(),
            created_at: chrono::Local::now().naive_local(),
        }
    }
}

/// Notes keyed by the calendar date that owns them. A date with no notes
/// has no entry; the store removes keys whose lists empty out.
pub type NoteBoard = BTreeMap<NaiveDate, Vec<StickyNote>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_without_color_takes_default() {
        let json = r#"{
            "id": "7a1f0c9e-2b4d-4f6a-8c1e-5d3b9a7e0f12",
            "text": "call the vendor",
            "createdAt": "2026-02-01T10:00:00"
        }"#;
        let note: StickyNote = serde_json::from_str(json).unwrap();
        assert_eq!(note.color, DEFAULT_COLOR);
    }
}
