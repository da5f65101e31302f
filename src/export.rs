use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::core::project::Project;
use crate::core::sticky_note::NoteBoard;
use crate::core::task::Task;
use crate::core::team::Team;
use crate::error::Result;

/// The full-backup document: everything the store holds plus the moment it
/// was taken. The JSON shape (camelCase keys, one field per collection) is
/// an external contract and must round-trip with no field loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub teams: Vec<Team>,
    pub sticky_notes: NoteBoard,
    pub settings: Settings,
    pub export_date: NaiveDateTime,
}

impl Backup {
    /// Human-inspectable JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
