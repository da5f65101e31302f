use uuid::Uuid;

use super::task::{Category, Priority, Task};

/// Completion facet of the task filter: everything, open tasks only, or
/// completed tasks only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Filter criteria for task lists. `Default` matches every task.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title, description, and
    /// assignee. Empty matches everything.
    pub search: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub project: Option<Uuid>,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
                || task.assignee.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(category) = self.category {
            if task.category != category {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(project) = self.project {
            if task.project != Some(project) {
                return false;
            }
        }
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

/// Tasks matching `filter`, in the order they appear in `tasks`.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        let mut fix = Task::new("Fix login bug");
        fix.description = "session cookie expires early".to_string();
        fix.assignee = "Ana".to_string();
        fix.category = Category::Development;
        fix.priority = Priority::High;

        let mut banner = Task::new("Design banner");
        banner.assignee = "Bo".to_string();
        banner.category = Category::Design;
        banner.priority = Priority::Low;
        banner.completed = true;

        let mut outreach = Task::new("Quarterly outreach");
        outreach.category = Category::Marketing;
        outreach.priority = Priority::Medium;

        vec![fix, banner, outreach]
    }

    #[test]
    fn default_filter_returns_everything_in_order() {
        let tasks = sample_tasks();
        let filtered = filter_tasks(&tasks, &TaskFilter::default());
        assert_eq!(filtered.len(), tasks.len());
        for (a, b) in filtered.iter().zip(&tasks) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let tasks = sample_tasks();

        let by_title = filter_tasks(
            &tasks,
            &TaskFilter {
                search: "LOGIN".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Fix login bug");

        let by_description = filter_tasks(
            &tasks,
            &TaskFilter {
                search: "cookie".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_description.len(), 1);

        let by_assignee = filter_tasks(
            &tasks,
            &TaskFilter {
                search: "bo".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(by_assignee.len(), 1);
        assert_eq!(by_assignee[0].title, "Design banner");
    }

    #[test]
    fn category_and_priority_are_exact_matches() {
        let tasks = sample_tasks();

        let design = filter_tasks(
            &tasks,
            &TaskFilter {
                category: Some(Category::Design),
                ..Default::default()
            },
        );
        assert_eq!(design.len(), 1);

        let high = filter_tasks(
            &tasks,
            &TaskFilter {
                priority: Some(Priority::High),
                ..Default::default()
            },
        );
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].title, "Fix login bug");
    }

    #[test]
    fn status_filter_splits_on_completion() {
        let tasks = sample_tasks();

        let active = filter_tasks(
            &tasks,
            &TaskFilter {
                status: StatusFilter::Active,
                ..Default::default()
            },
        );
        assert_eq!(active.len(), 2);

        let completed = filter_tasks(
            &tasks,
            &TaskFilter {
                status: StatusFilter::Completed,
                ..Default::default()
            },
        );
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "Design banner");
    }

    #[test]
    fn project_filter_matches_attached_tasks_only() {
        let mut tasks = sample_tasks();
        let project = Uuid::new_v4();
        tasks[0].project = Some(project);

        let attached = filter_tasks(
            &tasks,
            &TaskFilter {
                project: Some(project),
                ..Default::default()
            },
        );
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].title, "Fix login bug");
    }
}
