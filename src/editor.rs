//! Task editor form.
//!
//! The editor collects the fields of one task, either a new task aimed at a
//! column or an existing task being edited. Nothing reaches the store until
//! `submit` succeeds; dropping the editor discards the draft.

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::dates::parse_due_input;
use crate::error::{Error, Result};
use crate::fields::{Priority, Status};
use crate::input::InputField;
use crate::task::{Task, TaskPatch};
use crate::user::User;

/// Form fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Description,
    Priority,
    Assignee,
    DueDate,
    Labels,
}

impl EditorField {
    pub const ALL: [EditorField; 6] = [
        EditorField::Title,
        EditorField::Description,
        EditorField::Priority,
        EditorField::Assignee,
        EditorField::DueDate,
        EditorField::Labels,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditorField::Title => "Title",
            EditorField::Description => "Description",
            EditorField::Priority => "Priority",
            EditorField::Assignee => "Assignee",
            EditorField::DueDate => "Due Date",
            EditorField::Labels => "Labels (Enter to add)",
        }
    }

    fn position(self) -> usize {
        EditorField::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
enum EditorMode {
    Create { status: Status },
    Edit { task: Task },
}

/// What a successful submit asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Create(Task),
    Update { id: String, patch: TaskPatch },
}

/// Modal form for creating or editing a task.
#[derive(Debug, Clone)]
pub struct TaskEditor {
    mode: EditorMode,
    pub title: InputField,
    pub description: InputField,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due_date: InputField,
    pub labels: Vec<String>,
    pub label_input: InputField,
    pub current_field: EditorField,
}

impl TaskEditor {
    /// A blank form for a new task in the `target` column.
    pub fn create(target: Status) -> Self {
        let mut editor = TaskEditor {
            mode: EditorMode::Create { status: target },
            title: InputField::new(),
            description: InputField::new(),
            priority: Priority::default(),
            assignee: None,
            due_date: InputField::new(),
            labels: Vec::new(),
            label_input: InputField::new(),
            current_field: EditorField::Title,
        };
        editor.update_active_field();
        editor
    }

    /// A form populated from an existing task.
    pub fn edit(task: &Task) -> Self {
        let mut editor = TaskEditor {
            mode: EditorMode::Edit { task: task.clone() },
            title: InputField::with_value(&task.title),
            description: InputField::with_value(task.description.as_deref().unwrap_or_default()),
            priority: task.priority,
            assignee: task.assignee.clone(),
            due_date: InputField::with_value(
                &task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            ),
            labels: task.labels.clone(),
            label_input: InputField::new(),
            current_field: EditorField::Title,
        };
        editor.update_active_field();
        editor
    }

    pub fn is_new(&self) -> bool {
        matches!(self.mode, EditorMode::Create { .. })
    }

    /// Status the task has (or will have) when saved.
    pub fn status(&self) -> Status {
        match &self.mode {
            EditorMode::Create { status } => *status,
            EditorMode::Edit { task } => task.status,
        }
    }

    /// Id of the task under edit.
    pub fn task_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Create { .. } => None,
            EditorMode::Edit { task } => Some(&task.id),
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.is_new() {
            "New Task"
        } else {
            "Edit Task"
        }
    }

    /// Append the label being typed. Blank input is ignored.
    pub fn confirm_label(&mut self) -> bool {
        let Some(label) = self.label_input.trimmed().map(str::to_string) else {
            return false;
        };
        self.labels.push(label);
        self.label_input.clear();
        true
    }

    /// Remove one label by position.
    pub fn remove_label(&mut self, index: usize) -> Option<String> {
        (index < self.labels.len()).then(|| self.labels.remove(index))
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_assignee(&mut self, assignee: Option<String>) {
        self.assignee = assignee.filter(|a| !a.trim().is_empty());
    }

    /// Step through "Unassigned" followed by every user.
    pub fn cycle_assignee(&mut self, users: &[User], forward: bool) {
        let choices = users.len() + 1;
        let current = self
            .assignee
            .as_deref()
            .and_then(|id| users.iter().position(|u| u.id == id))
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward { (current + 1) % choices } else { (current + choices - 1) % choices };
        self.assignee = (next > 0).then(|| users[next - 1].id.clone());
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        let i = (self.current_field.position() + 1) % EditorField::ALL.len();
        self.current_field = EditorField::ALL[i];
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        let len = EditorField::ALL.len();
        let i = (self.current_field.position() + len - 1) % len;
        self.current_field = EditorField::ALL[i];
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == EditorField::Title;
        self.description.active = self.current_field == EditorField::Description;
        self.due_date.active = self.current_field == EditorField::DueDate;
        self.label_input.active = self.current_field == EditorField::Labels;
    }

    /// Text field under the cursor, if the current field is free text.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            EditorField::Title => Some(&mut self.title),
            EditorField::Description => Some(&mut self.description),
            EditorField::DueDate => Some(&mut self.due_date),
            EditorField::Labels => Some(&mut self.label_input),
            EditorField::Priority | EditorField::Assignee => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        } else if self.current_field == EditorField::Assignee {
            self.assignee = None;
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool, users: &[User]) {
        match self.current_field {
            EditorField::Priority => {
                self.priority = if right { self.priority.next() } else { self.priority.prev() };
            }
            EditorField::Assignee => self.cycle_assignee(users, right),
            _ => {
                if let Some(field) = self.active_input() {
                    if right {
                        field.move_cursor_right()
                    } else {
                        field.move_cursor_left()
                    }
                }
            }
        }
    }

    /// Validate the form and build the store change.
    pub fn submit(&self, project_id: &str, now: DateTime<Utc>) -> Result<EditorOutcome> {
        let title = self
            .title
            .trimmed()
            .ok_or_else(|| Error::Validation("title is required".into()))?
            .to_string();
        let today = now.with_timezone(&Local).date_naive();
        let due_date = match self.due_date.trimmed() {
            None => None,
            Some(raw) => Some(
                parse_due_input(raw, today)
                    .ok_or_else(|| Error::Validation(format!("unrecognised due date '{raw}'")))?,
            ),
        };
        let description = self.description.trimmed().map(str::to_string);

        let outcome = match &self.mode {
            EditorMode::Create { status } => EditorOutcome::Create(Task {
                id: Uuid::new_v4().to_string(),
                title,
                description,
                status: *status,
                priority: self.priority,
                assignee: self.assignee.clone(),
                due_date,
                labels: self.labels.clone(),
                created_at: now,
                project_id: project_id.to_string(),
            }),
            EditorMode::Edit { task } => EditorOutcome::Update {
                id: task.id.clone(),
                patch: TaskPatch {
                    title: Some(title),
                    description: Some(description),
                    status: None,
                    priority: Some(self.priority),
                    assignee: Some(self.assignee.clone()),
                    due_date: Some(due_date),
                    labels: Some(self.labels.clone()),
                },
            },
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::store::TaskStore;
    use crate::task::tests::sample;
    use crate::user;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap()
    }

    fn type_text(editor: &mut TaskEditor, text: &str) {
        for c in text.chars() {
            editor.handle_char(c);
        }
    }

    #[test]
    fn test_title_only_create_defaults() {
        let mut editor = TaskEditor::create(Status::Review);
        type_text(&mut editor, "Write release notes");

        let EditorOutcome::Create(task) = editor.submit("2", now()).unwrap() else {
            panic!("expected a new task");
        };
        assert_eq!(task.title, "Write release notes");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.labels.is_empty());
        assert_eq!(task.assignee, None);
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.status, Status::Review);
        assert_eq!(task.project_id, "2");
        assert_eq!(task.created_at, now());
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut editor = TaskEditor::create(Status::Todo);
        type_text(&mut editor, "   ");
        assert!(matches!(editor.submit("1", now()), Err(Error::Validation(_))));
    }

    #[test]
    fn test_bad_due_date_is_rejected() {
        let mut editor = TaskEditor::create(Status::Todo);
        type_text(&mut editor, "Ship");
        editor.due_date = InputField::with_value("whenever");
        assert!(matches!(editor.submit("1", now()), Err(Error::Validation(_))));

        editor.due_date = InputField::with_value("in 999999999999d");
        assert!(matches!(editor.submit("1", now()), Err(Error::Validation(_))));

        editor.due_date = InputField::with_value("2024-05-01");
        let EditorOutcome::Create(task) = editor.submit("1", now()).unwrap() else {
            panic!("expected a new task");
        };
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_label_entry() {
        let mut editor = TaskEditor::create(Status::Todo);
        editor.current_field = EditorField::Labels;
        editor.label_input = InputField::with_value("   ");
        assert!(!editor.confirm_label());
        assert!(editor.labels.is_empty());

        editor.label_input = InputField::with_value("  bug ");
        assert!(editor.confirm_label());
        assert_eq!(editor.label_input.value, "");
        editor.label_input = InputField::with_value("bug");
        editor.confirm_label();
        editor.label_input = InputField::with_value("design");
        editor.confirm_label();
        assert_eq!(editor.labels, vec!["bug", "bug", "design"]);

        assert_eq!(editor.remove_label(1), Some("bug".to_string()));
        assert_eq!(editor.remove_label(9), None);
        assert_eq!(editor.labels, vec!["bug", "design"]);
    }

    #[test]
    fn test_edit_merges_over_existing() {
        let original = sample("a", Status::InProgress, "1");
        let mut store = TaskStore::load(MemoryStore::new(), "1");
        store.add(original.clone()).unwrap();

        let mut editor = TaskEditor::edit(&original);
        assert_eq!(editor.heading(), "Edit Task");
        assert_eq!(editor.due_date.value, "2024-03-01");
        editor.title = InputField::with_value("Renamed");
        editor.set_priority(Priority::Low);

        let outcome = editor.submit("1", now()).unwrap();
        assert!(store.commit(outcome).unwrap());

        let task = store.get("a").unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.labels, original.labels);
        assert_eq!(task.created_at, original.created_at);
        assert_eq!(task.project_id, "1");
    }

    #[test]
    fn test_field_navigation_and_selectors() {
        let users = user::directory();
        let mut editor = TaskEditor::create(Status::Todo);
        editor.next_field();
        editor.next_field();
        assert_eq!(editor.current_field, EditorField::Priority);
        editor.handle_left_right(true, users);
        assert_eq!(editor.priority, Priority::High);

        editor.next_field();
        editor.handle_left_right(true, users);
        assert_eq!(editor.assignee.as_deref(), Some("u1"));
        editor.handle_left_right(false, users);
        assert_eq!(editor.assignee, None);
        editor.handle_left_right(false, users);
        assert_eq!(editor.assignee.as_deref(), Some("u5"));

        editor.prev_field();
        editor.prev_field();
        editor.prev_field();
        editor.prev_field();
        assert_eq!(editor.current_field, EditorField::Labels);
        assert!(editor.label_input.active);
    }
}
