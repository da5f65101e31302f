use chrono::NaiveDate;
use futures::future::{self, BoxFuture, FutureExt};
use uuid::Uuid;

use crate::config::Settings;
use crate::core::project::{Project, ProjectDraft};
use crate::core::sticky_note::StickyNote;
use crate::core::task::{Status, Task, TaskDraft};
use crate::core::team::{Member, Team, TeamDraft};
use crate::error::{Error, Result};
use crate::storage::SnapshotStore;
use crate::store::Store;

/// Weight of a notification, used by the presentation layer to pick tone
/// and sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Outbound notification channel. Purely informational; the data model
/// never depends on it.
pub trait Notify {
    fn notify(&self, message: &str, severity: Severity);
}

/// Notifier that drops everything.
pub struct NullNotify;

impl Notify for NullNotify {
    fn notify(&self, _message: &str, _severity: Severity) {}
}

/// Asynchronous yes/no confirmation. Destructive commands suspend on it and
/// either commit or leave all state untouched.
pub trait Confirm {
    fn confirm(&self, message: &str) -> BoxFuture<'_, bool>;
}

/// Approves every request; useful for tests and headless batch use.
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> BoxFuture<'_, bool> {
        future::ready(true).boxed()
    }
}

/// Declines every request.
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _message: &str) -> BoxFuture<'_, bool> {
        future::ready(false).boxed()
    }
}

/// Command layer over the store: runs each user intent against the data
/// model, asks the injected confirmation capability before destroying
/// anything, and reports outcomes through the notifier. Commands return the
/// updated entity (or a success indicator) so the presentation layer can
/// decide what to render.
pub struct Organizer<S: SnapshotStore, C: Confirm, N: Notify> {
    store: Store<S>,
    confirm: C,
    notify: N,
}

impl<S: SnapshotStore, C: Confirm, N: Notify> Organizer<S, C, N> {
    pub fn new(store: Store<S>, confirm: C, notify: N) -> Self {
        Self {
            store,
            confirm,
            notify,
        }
    }

    /// Read access for queries and derivations.
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    fn report<T>(&self, result: Result<T>, message: &str, severity: Severity) -> Result<T> {
        match result {
            Ok(value) => {
                self.notify.notify(message, severity);
                Ok(value)
            }
            Err(err) => {
                self.notify.notify(&err.to_string(), Severity::Error);
                Err(err)
            }
        }
    }

    // --- tasks ---

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let result = self.store.create_task(draft);
        self.report(result, "Task created successfully", Severity::Success)
    }

    pub fn add_task_to_column(&mut self, status: Status, draft: TaskDraft) -> Result<Task> {
        let result = self.store.create_task_in_column(status, draft);
        let message = format!("Task created in {}", status.label());
        self.report(result, &message, Severity::Success)
    }

    pub fn toggle_task(&mut self, id: Uuid) -> Result<Option<Task>> {
        let toggled = self.store.toggle_task_completion(id)?;
        if let Some(task) = &toggled {
            if task.completed {
                self.notify.notify("Task completed", Severity::Success);
            } else {
                self.notify.notify("Task reopened", Severity::Info);
            }
        }
        Ok(toggled)
    }

    pub async fn delete_task(&mut self, id: Uuid) -> Result<bool> {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this task?")
            .await
        {
            return Ok(false);
        }
        let removed = self.store.delete_task(id)?;
        if removed {
            self.notify.notify("Task deleted", Severity::Info);
        }
        Ok(removed)
    }

    pub async fn clear_completed(&mut self) -> Result<usize> {
        let count = self.store.tasks().iter().filter(|t| t.completed).count();
        if count == 0 {
            self.notify
                .notify("No completed tasks to clear", Severity::Info);
            return Ok(0);
        }
        let message = format!("Delete {count} completed task(s)?");
        if !self.confirm.confirm(&message).await {
            return Ok(0);
        }
        let removed = self.store.clear_completed()?;
        self.notify
            .notify(&format!("{removed} task(s) cleared"), Severity::Success);
        Ok(removed)
    }

    /// Drag-and-drop or column pick: move a task to an arbitrary status.
    pub fn move_task(&mut self, id: Uuid, status: Status) -> Result<Option<Task>> {
        let moved = self.store.set_task_status(id, status)?;
        self.announce_move(&moved);
        Ok(moved)
    }

    pub fn move_task_forward(&mut self, id: Uuid) -> Result<Option<Task>> {
        let moved = self.store.move_task_forward(id)?;
        self.announce_move(&moved);
        Ok(moved)
    }

    pub fn move_task_back(&mut self, id: Uuid) -> Result<Option<Task>> {
        let moved = self.store.move_task_back(id)?;
        self.announce_move(&moved);
        Ok(moved)
    }

    fn announce_move(&self, moved: &Option<Task>) {
        if let Some(task) = moved {
            self.notify.notify(
                &format!("Task moved to {}", task.status.label()),
                Severity::Success,
            );
        }
    }

    // --- projects ---

    pub fn add_project(&mut self, draft: ProjectDraft) -> Result<Project> {
        let result = self.store.create_project(draft);
        self.report(result, "Project created successfully", Severity::Success)
    }

    /// Delete a project after confirmation. The prompt warns when tasks are
    /// still attached; declining leaves every collection untouched.
    pub async fn delete_project(&mut self, id: Uuid) -> Result<bool> {
        let Some(project) = self.store.project(id) else {
            let err = Error::NotFound {
                kind: "project",
                id,
            };
            self.notify.notify(&err.to_string(), Severity::Error);
            return Err(err);
        };
        let task_count = self.store.project_task_count(id);
        let message = if task_count > 0 {
            format!("This project has {task_count} task(s). Delete anyway?")
        } else {
            format!("Delete project \"{}\"?", project.name)
        };
        if !self.confirm.confirm(&message).await {
            return Ok(false);
        }
        self.store.delete_project(id)?;
        self.notify.notify("Project deleted", Severity::Info);
        Ok(true)
    }

    // --- teams ---

    pub fn add_team(&mut self, draft: TeamDraft) -> Result<Team> {
        let result = self.store.create_team(draft);
        self.report(result, "Team created successfully", Severity::Success)
    }

    pub async fn delete_team(&mut self, id: Uuid) -> Result<bool> {
        let Some(team) = self.store.team(id) else {
            let err = Error::NotFound { kind: "team", id };
            self.notify.notify(&err.to_string(), Severity::Error);
            return Err(err);
        };
        let message = format!("Delete team \"{}\"?", team.name);
        if !self.confirm.confirm(&message).await {
            return Ok(false);
        }
        self.store.delete_team(id)?;
        self.notify.notify("Team deleted", Severity::Info);
        Ok(true)
    }

    pub fn add_member(&mut self, team_id: Uuid, name: &str, role: &str) -> Result<Member> {
        match self.store.add_team_member(team_id, name, role) {
            Ok(member) => {
                let team_name = self
                    .store
                    .team(team_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                self.notify.notify(
                    &format!("{} added to {}", member.name, team_name),
                    Severity::Success,
                );
                Ok(member)
            }
            Err(err) => {
                self.notify.notify(&err.to_string(), Severity::Error);
                Err(err)
            }
        }
    }

    pub fn remove_member(&mut self, team_id: Uuid, member_id: Uuid) -> Result<()> {
        let result = self.store.remove_team_member(team_id, member_id);
        self.report(result, "Member removed", Severity::Info)
    }

    // --- sticky notes ---

    pub fn save_sticky_note(
        &mut self,
        date: NaiveDate,
        existing: Option<Uuid>,
        text: &str,
        color: &str,
    ) -> Result<StickyNote> {
        let result = self.store.upsert_sticky_note(date, existing, text, color);
        self.report(result, "Sticky note saved", Severity::Success)
    }

    pub async fn delete_sticky_note(&mut self, id: Uuid) -> Result<bool> {
        if !self.confirm.confirm("Delete this sticky note?").await {
            return Ok(false);
        }
        let removed = self.store.delete_sticky_note(id)?;
        if removed {
            self.notify.notify("Sticky note deleted", Severity::Info);
        }
        Ok(removed)
    }

    // --- settings / data management ---

    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        let result = self.store.update_settings(settings);
        self.report(result, "Settings saved successfully", Severity::Success)
    }

    /// Full backup as pretty-printed JSON.
    pub fn export_all(&self) -> Result<String> {
        let result = self.store.export().to_json();
        self.report(result, "Data exported successfully", Severity::Success)
    }

    /// Tasks-only export, for the task list toolbar.
    pub fn export_tasks(&self) -> Result<String> {
        let result = serde_json::to_string_pretty(self.store.tasks()).map_err(Error::from);
        self.report(result, "Tasks exported successfully", Severity::Success)
    }

    /// Wipe all four collections after a confirmation. Settings survive.
    pub async fn clear_all_data(&mut self) -> Result<bool> {
        let message = "This will delete ALL tasks, projects, teams, and sticky notes. \
                       This cannot be undone. Are you absolutely sure?";
        if !self.confirm.confirm(message).await {
            return Ok(false);
        }
        self.store.clear_all()?;
        self.notify.notify("All data cleared", Severity::Info);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;

    /// Captures notifications for assertions.
    #[derive(Default)]
    struct Recorder {
        messages: RefCell<Vec<(String, Severity)>>,
    }

    impl Notify for Recorder {
        fn notify(&self, message: &str, severity: Severity) {
            self.messages
                .borrow_mut()
                .push((message.to_string(), severity));
        }
    }

    fn organizer<C: Confirm>(confirm: C) -> Organizer<MemoryStore, C, Recorder> {
        Organizer::new(
            Store::load(MemoryStore::new()),
            confirm,
            Recorder::default(),
        )
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn last_message<S: SnapshotStore, C: Confirm>(
        org: &Organizer<S, C, Recorder>,
    ) -> (String, Severity) {
        org.notify
            .messages
            .borrow()
            .last()
            .cloned()
            .expect("a notification should have been sent")
    }

    #[test]
    fn add_task_notifies_success() {
        let mut org = organizer(AlwaysConfirm);
        org.add_task(draft("Hello")).unwrap();
        assert_eq!(
            last_message(&org),
            ("Task created successfully".to_string(), Severity::Success)
        );
    }

    #[test]
    fn validation_failures_are_notified_as_errors() {
        let mut org = organizer(AlwaysConfirm);
        let err = org.add_task(draft(" ")).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        let (message, severity) = last_message(&org);
        assert_eq!(severity, Severity::Error);
        assert!(message.contains("title"));
    }

    #[test]
    fn toggle_messages_follow_the_new_state() {
        let mut org = organizer(AlwaysConfirm);
        let task = org.add_task(draft("Flip me")).unwrap();

        org.toggle_task(task.id).unwrap();
        assert_eq!(
            last_message(&org),
            ("Task completed".to_string(), Severity::Success)
        );

        org.toggle_task(task.id).unwrap();
        assert_eq!(
            last_message(&org),
            ("Task reopened".to_string(), Severity::Info)
        );
    }

    #[test]
    fn move_notification_uses_the_column_label() {
        let mut org = organizer(AlwaysConfirm);
        let task = org.add_task(draft("Mover")).unwrap();
        org.move_task(task.id, Status::Review).unwrap();
        assert_eq!(
            last_message(&org),
            ("Task moved to In Review".to_string(), Severity::Success)
        );
    }

    #[tokio::test]
    async fn declined_confirmation_leaves_state_unchanged() {
        let mut org = organizer(NeverConfirm);
        let task = org.add_task(draft("Survivor")).unwrap();
        let project = org
            .add_project(ProjectDraft {
                name: "Keeper".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(!org.delete_task(task.id).await.unwrap());
        assert!(!org.delete_project(project.id).await.unwrap());
        assert!(!org.clear_all_data().await.unwrap());

        assert_eq!(org.store().tasks().len(), 1);
        assert_eq!(org.store().projects().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_project_delete_detaches_tasks() {
        let mut org = organizer(AlwaysConfirm);
        let project = org
            .add_project(ProjectDraft {
                name: "Doomed".to_string(),
                ..Default::default()
            })
            .unwrap();
        let task = org
            .add_task(TaskDraft {
                project: Some(project.id),
                ..draft("Attached")
            })
            .unwrap();

        assert!(org.delete_project(project.id).await.unwrap());
        assert!(org.store().project(project.id).is_none());
        assert_eq!(org.store().task(task.id).unwrap().project, None);
        assert_eq!(
            last_message(&org),
            ("Project deleted".to_string(), Severity::Info)
        );
    }

    #[tokio::test]
    async fn clear_completed_reports_the_count() {
        let mut org = organizer(AlwaysConfirm);

        assert_eq!(org.clear_completed().await.unwrap(), 0);
        assert_eq!(
            last_message(&org),
            ("No completed tasks to clear".to_string(), Severity::Info)
        );

        let a = org.add_task(draft("One")).unwrap();
        let b = org.add_task(draft("Two")).unwrap();
        org.toggle_task(a.id).unwrap();
        org.toggle_task(b.id).unwrap();

        assert_eq!(org.clear_completed().await.unwrap(), 2);
        assert_eq!(
            last_message(&org),
            ("2 task(s) cleared".to_string(), Severity::Success)
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_project_surfaces_not_found() {
        let mut org = organizer(AlwaysConfirm);
        let err = org.delete_project(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "project", .. }));
        assert_eq!(last_message(&org).1, Severity::Error);
    }

    #[test]
    fn member_notification_names_both_sides() {
        let mut org = organizer(AlwaysConfirm);
        let team = org
            .add_team(TeamDraft {
                name: "Platform".to_string(),
                ..Default::default()
            })
            .unwrap();
        org.add_member(team.id, "Dana", "").unwrap();
        assert_eq!(
            last_message(&org),
            ("Dana added to Platform".to_string(), Severity::Success)
        );
    }

    #[test]
    fn commands_do_not_depend_on_the_notifier() {
        let mut org = Organizer::new(Store::load(MemoryStore::new()), AlwaysConfirm, NullNotify);
        let task = org.add_task(draft("Quiet")).unwrap();
        assert_eq!(org.store().tasks().len(), 1);
        org.toggle_task(task.id).unwrap();
        assert!(org.store().task(task.id).unwrap().completed);
    }

    #[test]
    fn exports_are_valid_json() {
        let mut org = organizer(AlwaysConfirm);
        org.add_task(draft("Exported")).unwrap();

        let tasks_json = org.export_tasks().unwrap();
        let tasks: serde_json::Value = serde_json::from_str(&tasks_json).unwrap();
        assert_eq!(tasks.as_array().unwrap().len(), 1);

        let backup_json = org.export_all().unwrap();
        let backup: serde_json::Value = serde_json::from_str(&backup_json).unwrap();
        assert!(backup.get("stickyNotes").is_some());
        assert!(backup.get("exportDate").is_some());
    }
}
