use chrono::NaiveDateTime;

use super::task::{Status, Task};

/// Dashboard counters, recomputed whenever the task collection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: NaiveDateTime) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.completed).count(),
            in_progress: tasks
                .iter()
                .filter(|t| t.status == Status::InProgress)
                .count(),
            overdue: tasks.iter().filter(|t| t.is_overdue(now)).count(),
        }
    }
}
