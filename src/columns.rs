//! Column projection of a project's task list.

use crate::fields::Status;
use crate::store::TaskListener;
use crate::task::Task;

/// A read-only bucket of tasks sharing one status.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: &'static str,
    pub title: &'static str,
    pub status: Status,
    pub tasks: Vec<Task>,
}

impl Column {
    fn empty(status: Status) -> Self {
        Column {
            id: status.column_id(),
            title: status.title(),
            status,
            tasks: Vec::new(),
        }
    }
}

/// Partition the tasks of `project_id` into the four status columns.
///
/// Columns always come back in board order, empty ones included, and each
/// keeps the relative order of the input list.
pub fn columns(tasks: &[Task], project_id: &str) -> [Column; 4] {
    let mut out = Status::ALL.map(Column::empty);
    for task in tasks.iter().filter(|t| t.project_id == project_id) {
        out[task.status.index()].tasks.push(task.clone());
    }
    out
}

/// Latest column projection for one project, kept current by the store.
#[derive(Debug, Clone)]
pub struct ColumnView {
    project_id: String,
    columns: [Column; 4],
}

impl ColumnView {
    pub fn new(project_id: &str) -> Self {
        ColumnView {
            project_id: project_id.to_string(),
            columns: columns(&[], project_id),
        }
    }

    pub fn columns(&self) -> &[Column; 4] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &Column {
        &self.columns[status.index()]
    }

    /// Number of tasks across all columns.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

impl TaskListener for ColumnView {
    fn tasks_changed(&mut self, tasks: &[Task]) {
        self.columns = columns(tasks, &self.project_id);
    }
}
