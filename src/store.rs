use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Settings;
use crate::core::project::{Project, ProjectDraft, ProjectStatus};
use crate::core::sticky_note::{NoteBoard, StickyNote};
use crate::core::task::{Category, Priority, Status, Task, TaskDraft};
use crate::core::team::{Member, Team, TeamDraft};
use crate::error::{Error, Result};
use crate::export::Backup;
use crate::storage::SnapshotStore;

/// Storage keys, one JSON blob per collection.
mod keys {
    pub const TASKS: &str = "tasks";
    pub const PROJECTS: &str = "projects";
    pub const TEAMS: &str = "teams";
    pub const STICKY_NOTES: &str = "stickyNotes";
    pub const SETTINGS: &str = "settings";
}

/// The authoritative in-memory holder of the four collections and the
/// settings. Every mutation writes the affected collection back to storage
/// as a whole-collection snapshot. When a write fails the mutation stays
/// applied (memory remains the source of truth for the session) and the
/// failure is returned for the caller to report.
pub struct Store<S: SnapshotStore> {
    storage: S,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    teams: Vec<Team>,
    sticky_notes: NoteBoard,
    settings: Settings,
}

fn load_collection<S: SnapshotStore, T: DeserializeOwned + Default>(storage: &S, key: &str) -> T {
    match storage.read(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Failed to parse stored {key}: {err}");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            log::error!("Failed to read stored {key}: {err}");
            T::default()
        }
    }
}

impl<S: SnapshotStore> Store<S> {
    /// Load all collections from storage. A missing key is an empty
    /// collection (or default settings); an unreadable one is logged and
    /// treated the same, so a damaged snapshot never blocks a session.
    pub fn load(storage: S) -> Self {
        Self {
            tasks: load_collection(&storage, keys::TASKS),
            projects: load_collection(&storage, keys::PROJECTS),
            teams: load_collection(&storage, keys::TEAMS),
            sticky_notes: load_collection(&storage, keys::STICKY_NOTES),
            settings: load_collection(&storage, keys::SETTINGS),
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn sticky_notes(&self) -> &NoteBoard {
        &self.sticky_notes
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn save_tasks(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.tasks)?;
        self.storage.write(keys::TASKS, &json)
    }

    fn save_projects(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.projects)?;
        self.storage.write(keys::PROJECTS, &json)
    }

    fn save_teams(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.teams)?;
        self.storage.write(keys::TEAMS, &json)
    }

    fn save_sticky_notes(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.sticky_notes)?;
        self.storage.write(keys::STICKY_NOTES, &json)
    }

    fn save_settings(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.settings)?;
        self.storage.write(keys::SETTINGS, &json)
    }

    // --- tasks ---

    /// Create a task from the draft and insert it at the FRONT of the
    /// sequence: task lists show newest-created first. The task starts not
    /// completed regardless of the draft's status.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = task_from_draft(draft, false)?;
        self.tasks.insert(0, task.clone());
        self.save_tasks()?;
        Ok(task)
    }

    /// Quick-add into a board column: like [`create_task`], but the
    /// completion flag is derived from the column (`done` starts completed).
    ///
    /// [`create_task`]: Store::create_task
    pub fn create_task_in_column(&mut self, status: Status, mut draft: TaskDraft) -> Result<Task> {
        draft.status = Some(status);
        let task = task_from_draft(draft, status.is_done())?;
        self.tasks.insert(0, task.clone());
        self.save_tasks()?;
        Ok(task)
    }

    /// Flip the completion flag, leaving `status` untouched. This is the
    /// one path where completed and status may drift apart. Missing id is a
    /// silent no-op.
    pub fn toggle_task_completion(&mut self, id: Uuid) -> Result<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let updated = task.clone();
        self.save_tasks()?;
        Ok(Some(updated))
    }

    /// Remove a task. Returns whether anything was removed; absent ids are
    /// a no-op.
    pub fn delete_task(&mut self, id: Uuid) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.save_tasks()?;
        Ok(true)
    }

    /// Remove every completed task, returning how many were removed.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.save_tasks()?;
        }
        Ok(removed)
    }

    /// Workflow-driven status change: `completed` is derived from the new
    /// status, true exactly when it is `done`. Missing id is a silent
    /// no-op.
    pub fn set_task_status(&mut self, id: Uuid, status: Status) -> Result<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.status = status;
        task.completed = status.is_done();
        let updated = task.clone();
        self.save_tasks()?;
        Ok(Some(updated))
    }

    /// Move one step forward in the workflow; no-op from `done`.
    pub fn move_task_forward(&mut self, id: Uuid) -> Result<Option<Task>> {
        match self.task(id).and_then(|t| t.status.forward()) {
            Some(next) => self.set_task_status(id, next),
            None => Ok(None),
        }
    }

    /// Move one step back in the workflow; no-op from `to-do`.
    pub fn move_task_back(&mut self, id: Uuid) -> Result<Option<Task>> {
        match self.task(id).and_then(|t| t.status.back()) {
            Some(prev) => self.set_task_status(id, prev),
            None => Ok(None),
        }
    }

    // --- projects ---

    /// Create a project (appended at the end of the collection). When the
    /// draft names a team, that team's `project` link is pointed at the new
    /// project, a one-directional sync that happens only at creation.
    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<Project> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::Validation { field: "name" });
        }
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: draft.description.trim().to_string(),
            color: draft.color,
            status: draft.status.unwrap_or(ProjectStatus::Active),
            team: draft.team,
            created_at: chrono::Local::now().naive_local(),
        };
        let project_id = project.id;
        self.projects.push(project.clone());
        self.save_projects()?;

        if let Some(team_id) = draft.team {
            if let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) {
                team.project = Some(project_id);
                self.save_teams()?;
            }
        }
        Ok(project)
    }

    /// Delete a project and detach every task referencing it (the tasks
    /// themselves survive with their project cleared). Returns how many
    /// tasks were detached. Confirmation is the caller's responsibility;
    /// the store never prompts.
    pub fn delete_project(&mut self, id: Uuid) -> Result<usize> {
        let Some(pos) = self.projects.iter().position(|p| p.id == id) else {
            return Err(Error::NotFound {
                kind: "project",
                id,
            });
        };
        self.projects.remove(pos);
        let mut detached = 0;
        for task in &mut self.tasks {
            if task.project == Some(id) {
                task.project = None;
                detached += 1;
            }
        }
        self.save_projects()?;
        if detached > 0 {
            self.save_tasks()?;
        }
        Ok(detached)
    }

    pub fn tasks_in_project(&self, id: Uuid) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.project == Some(id))
            .cloned()
            .collect()
    }

    pub fn project_task_count(&self, id: Uuid) -> usize {
        self.tasks.iter().filter(|t| t.project == Some(id)).count()
    }

    // --- teams ---

    /// Create a team (appended). A project named in the draft is stored on
    /// the team only; the project's own `team` link is not updated.
    pub fn create_team(&mut self, draft: TeamDraft) -> Result<Team> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::Validation { field: "name" });
        }
        let team = Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: draft.description.trim().to_string(),
            project: draft.project,
            members: Vec::new(),
            created_at: chrono::Local::now().naive_local(),
        };
        self.teams.push(team.clone());
        self.save_teams()?;
        Ok(team)
    }

    /// Delete a team together with its members. Projects whose `team` link
    /// pointed here keep the stale reference; lookups resolve it to "no
    /// team".
    pub fn delete_team(&mut self, id: Uuid) -> Result<()> {
        let Some(pos) = self.teams.iter().position(|t| t.id == id) else {
            return Err(Error::NotFound { kind: "team", id });
        };
        self.teams.remove(pos);
        self.save_teams()?;
        Ok(())
    }

    /// Add a member to a team. An empty role becomes "Member".
    pub fn add_team_member(&mut self, team_id: Uuid, name: &str, role: &str) -> Result<Member> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation { field: "name" });
        }
        let role = role.trim();
        let member = Member {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: if role.is_empty() {
                "Member".to_string()
            } else {
                role.to_string()
            },
        };
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(Error::NotFound {
                kind: "team",
                id: team_id,
            })?;
        team.members.push(member.clone());
        self.save_teams()?;
        Ok(member)
    }

    /// Remove a member from a team. A missing member is a silent no-op; a
    /// missing team is an error.
    pub fn remove_team_member(&mut self, team_id: Uuid, member_id: Uuid) -> Result<()> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(Error::NotFound {
                kind: "team",
                id: team_id,
            })?;
        team.members.retain(|m| m.id != member_id);
        self.save_teams()?;
        Ok(())
    }

    // --- sticky notes ---

    /// Create or update a note under `date`. When `existing` names a note
    /// already on that date its text and color are rewritten in place;
    /// otherwise a fresh note is appended (including when `existing` is
    /// stale).
    pub fn upsert_sticky_note(
        &mut self,
        date: NaiveDate,
        existing: Option<Uuid>,
        text: &str,
        color: &str,
    ) -> Result<StickyNote> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation { field: "text" });
        }

        let note = {
            let notes = self.sticky_notes.entry(date).or_default();
            match existing.and_then(|id| notes.iter_mut().find(|n| n.id == id)) {
                Some(found) => {
                    found.text = text.to_string();
                    found.color = color.to_string();
                    found.clone()
                }
                None => {
                    let note = StickyNote::new(text, color);
                    notes.push(note.clone());
                    note
                }
            }
        };
        self.save_sticky_notes()?;
        Ok(note)
    }

    /// Remove a note from whichever date holds it; a date whose list
    /// empties out loses its key. Absent ids are a no-op.
    pub fn delete_sticky_note(&mut self, id: Uuid) -> Result<bool> {
        let mut removed = false;
        self.sticky_notes.retain(|_, notes| {
            let before = notes.len();
            notes.retain(|n| n.id != id);
            removed |= notes.len() != before;
            !notes.is_empty()
        });
        if removed {
            self.save_sticky_notes()?;
        }
        Ok(removed)
    }

    pub fn sticky_notes_for(&self, date: NaiveDate) -> &[StickyNote] {
        self.sticky_notes
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // --- settings / whole-store ---

    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        self.settings = settings;
        self.save_settings()
    }

    /// Empty the four collections and drop their storage keys. Settings are
    /// kept.
    pub fn clear_all(&mut self) -> Result<()> {
        self.tasks.clear();
        self.projects.clear();
        self.teams.clear();
        self.sticky_notes.clear();
        self.storage.remove(keys::TASKS)?;
        self.storage.remove(keys::PROJECTS)?;
        self.storage.remove(keys::TEAMS)?;
        self.storage.remove(keys::STICKY_NOTES)?;
        Ok(())
    }

    /// Full-backup document of everything the store holds.
    pub fn export(&self) -> Backup {
        Backup {
            tasks: self.tasks.clone(),
            projects: self.projects.clone(),
            teams: self.teams.clone(),
            sticky_notes: self.sticky_notes.clone(),
            settings: self.settings.clone(),
            export_date: chrono::Local::now().naive_local(),
        }
    }
}

fn task_from_draft(draft: TaskDraft, completed: bool) -> Result<Task> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(Error::Validation { field: "title" });
    }
    Ok(Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: draft.description.trim().to_string(),
        category: draft.category.unwrap_or(Category::Development),
        priority: draft.priority.unwrap_or(Priority::Medium),
        deadline: draft.deadline,
        time: draft.time,
        assignee: draft.assignee.trim().to_string(),
        project: draft.project,
        status: draft.status.unwrap_or_default(),
        completed,
        created_at: chrono::Local::now().naive_local(),
    })
}
