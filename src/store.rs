//! The task store: canonical task list of one project.
//!
//! The store loads its list from the project's slot once, then writes the
//! full list back after every mutation. Derived views (columns, progress)
//! register as `TaskListener`s and are recomputed after each successful
//! mutation, so the owner never has to remember to refresh them.
//!
//! All access is single-threaded. A host that shares a store between threads
//! must funnel every mutation through one owner, since a mutation is a
//! read-modify-write of the whole list.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::board::MoveIntent;
use crate::editor::EditorOutcome;
use crate::error::{Error, Result};
use crate::fields::Status;
use crate::storage::{read_tasks, tasks_key, write_tasks, SlotStore};
use crate::task::{Task, TaskPatch};

/// Something derived from a project's task list.
pub trait TaskListener {
    /// Called with the full list after every committed change.
    fn tasks_changed(&mut self, tasks: &[Task]);
}

impl<T: TaskListener> TaskListener for Rc<RefCell<T>> {
    fn tasks_changed(&mut self, tasks: &[Task]) {
        self.borrow_mut().tasks_changed(tasks);
    }
}

/// Owns one project's tasks and keeps the durable slot in sync.
pub struct TaskStore<S: SlotStore> {
    storage: S,
    project_id: String,
    key: String,
    tasks: Vec<Task>,
    listeners: Vec<Box<dyn TaskListener>>,
}

impl<S: SlotStore> TaskStore<S> {
    /// Load the task list for `project_id`. A missing or corrupt slot gives
    /// an empty board.
    pub fn load(storage: S, project_id: &str) -> Self {
        let key = tasks_key(project_id);
        let tasks = read_tasks(&storage, &key);
        debug!(project_id, count = tasks.len(), "task store loaded");
        TaskStore {
            storage,
            project_id: project_id.to_string(),
            key,
            tasks,
            listeners: Vec::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Direct access to the backing slots. Writes made here bypass the
    /// in-memory list and listeners.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Resolve a task reference: exact id, unique id prefix, or unique
    /// case-insensitive title.
    pub fn resolve(&self, query: &str) -> Result<&Task> {
        let query = query.trim();
        if let Some(task) = self.get(query) {
            return Ok(task);
        }

        let by_prefix: Vec<&Task> = self.tasks.iter().filter(|t| t.id.starts_with(query)).collect();
        let matches = if query.is_empty() || by_prefix.is_empty() {
            self.tasks
                .iter()
                .filter(|t| t.title.to_lowercase() == query.to_lowercase())
                .collect()
        } else {
            by_prefix
        };

        match matches.as_slice() {
            [] => Err(Error::TaskNotFound(query.to_string())),
            [task] => Ok(*task),
            many => {
                let candidates = many
                    .iter()
                    .map(|t| format!("  {}: {} ({})\n", t.id, t.title, t.status.title()))
                    .collect();
                Err(Error::AmbiguousTask { query: query.to_string(), candidates })
            }
        }
    }

    /// Register a derived computation. It is primed with the current list
    /// straight away.
    pub fn subscribe<L: TaskListener + 'static>(&mut self, mut listener: L) {
        listener.tasks_changed(&self.tasks);
        self.listeners.push(Box::new(listener));
    }

    /// Append a new task.
    pub fn add(&mut self, task: Task) -> Result<()> {
        debug!(project_id = %self.project_id, task_id = %task.id, "adding task");
        let mut next = self.tasks.clone();
        next.push(task);
        self.commit_list(next)
    }

    /// Apply a patch to the task with `id`. Returns `false` for an unknown id.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<bool> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(task_id = id, "update of unknown task ignored");
            return Ok(false);
        };
        let mut next = self.tasks.clone();
        next[idx] = patch.apply(&self.tasks[idx]);
        debug!(project_id = %self.project_id, task_id = id, "updating task");
        self.commit_list(next)?;
        Ok(true)
    }

    /// Remove the task with `id`. Returns `false` for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            debug!(task_id = id, "delete of unknown task ignored");
            return Ok(false);
        }
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        debug!(project_id = %self.project_id, task_id = id, "deleting task");
        self.commit_list(next)?;
        Ok(true)
    }

    /// Change only the status of the task with `id`.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<bool> {
        self.update(id, &TaskPatch::status(status))
    }

    /// Commit a completed drag. Unknown tasks are a no-op.
    pub fn apply_move(&mut self, intent: &MoveIntent) -> Result<bool> {
        self.set_status(&intent.task_id, intent.destination)
    }

    /// Commit a submitted editor form. Returns `false` when the edited task
    /// no longer exists.
    pub fn commit(&mut self, outcome: EditorOutcome) -> Result<bool> {
        match outcome {
            EditorOutcome::Create(task) => {
                self.add(task)?;
                Ok(true)
            }
            EditorOutcome::Update { id, patch } => self.update(&id, &patch),
        }
    }

    /// Persist first; the in-memory list only changes once the write landed.
    fn commit_list(&mut self, next: Vec<Task>) -> Result<()> {
        write_tasks(&mut self.storage, &self.key, &next)?;
        self.tasks = next;
        for listener in self.listeners.iter_mut() {
            listener.tasks_changed(&self.tasks);
        }
        Ok(())
    }
}
