use super::task::{Status, Task};

/// One board column: a workflow state and the tasks currently in it.
#[derive(Debug, Clone)]
pub struct KanbanColumn {
    pub status: Status,
    pub tasks: Vec<Task>,
}

impl KanbanColumn {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// The five-column board, columns in workflow order.
#[derive(Debug, Clone)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Partition `tasks` into the five workflow buckets. Within a column,
    /// tasks keep the order of the source collection (newest first).
    pub fn build(tasks: &[Task]) -> Self {
        let columns = Status::ALL
            .iter()
            .map(|&status| KanbanColumn {
                status,
                tasks: tasks
                    .iter()
                    .filter(|t| t.status == status)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, status: Status) -> &KanbanColumn {
        &self.columns[status.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_task_lands_in_exactly_one_column() {
        let mut review = Task::new("In review");
        review.status = Status::Review;
        let mut done = Task::new("Shipped");
        done.status = Status::Done;
        done.completed = true;
        let fresh = Task::new("Fresh");

        let board = KanbanBoard::build(&[review, done, fresh]);
        assert_eq!(board.columns.len(), 5);
        assert_eq!(board.column(Status::ToDo).count(), 1);
        assert_eq!(board.column(Status::Review).count(), 1);
        assert_eq!(board.column(Status::Done).count(), 1);
        assert_eq!(board.column(Status::InProgress).count(), 0);
        assert_eq!(board.column(Status::Qa).count(), 0);

        let total: usize = board.columns.iter().map(KanbanColumn::count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn columns_preserve_source_order() {
        let newest = Task::new("Newest");
        let older = Task::new("Older");
        let board = KanbanBoard::build(&[newest.clone(), older.clone()]);
        let column = board.column(Status::ToDo);
        assert_eq!(column.tasks[0].id, newest.id);
        assert_eq!(column.tasks[1].id, older.id);
    }
}
