use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person on a team. Members are owned by their team and disappear with
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

/// A team of members. `project` is an independent link to a project; it is
/// distinct from `Project::team` and the two are only aligned when a
/// project is created against an existing team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub project: Option<Uuid>,
    pub members: Vec<Member>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub project: Option<Uuid>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            project: None,
            members: Vec::new(),
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }
}
