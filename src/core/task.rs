use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Development,
    Design,
    Marketing,
    Sales,
    Operations,
    Hr,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Design => "design",
            Self::Marketing => "marketing",
            Self::Sales => "sales",
            Self::Operations => "operations",
            Self::Hr => "hr",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "development" => Some(Self::Development),
            "design" => Some(Self::Design),
            "marketing" => Some(Self::Marketing),
            "sales" => Some(Self::Sales),
            "operations" => Some(Self::Operations),
            "hr" => Some(Self::Hr),
            _ => None,
        }
    }

    /// Display label shown on task badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Design => "Design",
            Self::Marketing => "Marketing",
            Self::Sales => "Sales",
            Self::Operations => "Operations",
            Self::Hr => "Human Resources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Kanban workflow state. The five states form a strict linear order; any
/// transition is permitted, including backward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    ToDo,
    InProgress,
    Review,
    Qa,
    Done,
}

impl Status {
    /// All states in workflow order.
    pub const ALL: [Status; 5] = [
        Self::ToDo,
        Self::InProgress,
        Self::Review,
        Self::Qa,
        Self::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "to-do",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Qa => "qa",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "to-do" => Some(Self::ToDo),
            "in-progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "qa" => Some(Self::Qa),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Column heading shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "In Review",
            Self::Qa => "QA",
            Self::Done => "Done",
        }
    }

    /// Position in the workflow order (0..=4).
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// The next step forward, or `None` from `Done`.
    pub fn forward(&self) -> Option<Status> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The previous step, or `None` from `ToDo`.
    pub fn back(&self) -> Option<Status> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    /// Time of day for the deadline; only meaningful when `deadline` is set.
    pub time: Option<NaiveTime>,
    pub assignee: String,
    pub project: Option<Uuid>,
    /// Snapshots written before the board existed carry no status; those
    /// tasks land on `to-do`.
    #[serde(default)]
    pub status: Status,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

/// Caller-supplied fields for creating a task. The store assigns the id,
/// the creation stamp, and the completion flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub assignee: String,
    pub project: Option<Uuid>,
    pub status: Option<Status>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            category: Category::Development,
            priority: Priority::Medium,
            deadline: None,
            time: None,
            assignee: String::new(),
            project: None,
            status: Status::ToDo,
            completed: false,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// True when the deadline has passed. A task without a deadline, or a
    /// completed task, is never overdue. Without a time of day the deadline
    /// runs to the end of its calendar day.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        if self.completed {
            return false;
        }
        let Some(date) = self.deadline else {
            return false;
        };
        match self.time {
            Some(time) => date.and_time(time) < now,
            None => date < now.date(),
        }
    }

    /// Human-readable deadline badge: `"Overdue: <date>"`, `"Today"`,
    /// `"Tomorrow"`, or `"<date>"`, each with an optional `" at <time>"`
    /// suffix. `None` when the task has no deadline.
    pub fn deadline_label(&self, now: NaiveDateTime) -> Option<String> {
        let date = self.deadline?;

        let date_str = if date.year() == now.date().year() {
            date.format("%b %-d").to_string()
        } else {
            date.format("%b %-d, %Y").to_string()
        };
        let time_str = match self.time {
            Some(time) => format!(" at {}", time.format("%-I:%M %p")),
            None => String::new(),
        };

        if self.is_overdue(now) {
            return Some(format!("Overdue: {date_str}{time_str}"));
        }
        match (date - now.date()).num_days() {
            0 => Some(format!("Today{time_str}")),
            1 => Some(format!("Tomorrow{time_str}")),
            _ => Some(format!("{date_str}{time_str}")),
        }
    }
}
