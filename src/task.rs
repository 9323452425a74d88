//! Task data structure and partial-update patches.
//!
//! This module defines the `Task` record stored on a project's board and the
//! `TaskPatch` used to apply field edits over an existing task without
//! mutating it in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::*;

/// A unit of work on a project's board.
///
/// Field names are serialized in camelCase so stored boards keep the
/// `dueDate` / `createdAt` / `projectId` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default, deserialize_with = "blank_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub project_id: String,
}

/// Accept `""` for an unset due date as well as `null` or a missing key.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A partial task record. `None` leaves a field untouched; for optional task
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub labels: Option<Vec<String>>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    pub fn status(status: Status) -> Self {
        TaskPatch { status: Some(status), ..Default::default() }
    }

    /// Produce a new task with the patched fields replaced.
    ///
    /// `id`, `created_at` and `project_id` are never patchable.
    pub fn apply(&self, task: &Task) -> Task {
        let mut next = task.clone();
        if let Some(ref title) = self.title {
            next.title = title.clone();
        }
        if let Some(ref description) = self.description {
            next.description = description.clone();
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(ref assignee) = self.assignee {
            next.assignee = assignee.clone();
        }
        if let Some(due_date) = self.due_date {
            next.due_date = due_date;
        }
        if let Some(ref labels) = self.labels {
            next.labels = labels.clone();
        }
        next
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn sample(id: &str, status: Status, project_id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: Some("Details".to_string()),
            status,
            priority: Priority::High,
            assignee: Some("u3".to_string()),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            labels: vec!["bug".to_string(), "bug".to_string(), "design".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            project_id: project_id.to_string(),
        }
    }

    #[test]
    fn test_patch_keeps_unpatched_fields() {
        let task = sample("t1", Status::Todo, "1");
        let patch = TaskPatch { title: Some("Renamed".into()), ..Default::default() };
        let next = patch.apply(&task);
        assert_eq!(next.title, "Renamed");
        assert_eq!(next.description, task.description);
        assert_eq!(next.labels, task.labels);
        assert_eq!(next.created_at, task.created_at);
        // The original snapshot is untouched.
        assert_eq!(task.title, "Task t1");
    }

    #[test]
    fn test_patch_clears_optional_fields() {
        let task = sample("t1", Status::Todo, "1");
        let patch = TaskPatch {
            assignee: Some(None),
            due_date: Some(None),
            ..Default::default()
        };
        let next = patch.apply(&task);
        assert_eq!(next.assignee, None);
        assert_eq!(next.due_date, None);
        assert_eq!(next.priority, Priority::High);
    }

    #[test]
    fn test_camel_case_layout() {
        let task = sample("t1", Status::InProgress, "1");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["projectId"], "1");
        assert_eq!(json["dueDate"], "2024-03-01");
        assert_eq!(json["status"], "in-progress");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_blank_due_date_reads_as_none() {
        let raw = r#"{"id":"a","title":"T","status":"todo","priority":"low","assignee":"",
            "dueDate":"","labels":[],"createdAt":"2024-01-15T09:30:00.000Z","projectId":"1"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_missing_optionals_default() {
        let raw = r#"{"id":"a","title":"T","status":"done","createdAt":"2024-01-15T09:30:00Z","projectId":"2"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.labels.is_empty());
        assert_eq!(task.description, None);
    }
}
