//! Projects and their persisted progress.
//!
//! Each project owns one board. The catalog keeps the project records in a
//! slot of their own (`projects`) and is the receiver of progress reports
//! from a board's aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::storage::SlotStore;

/// Slot holding the project list.
pub const PROJECTS_KEY: &str = "projects";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
    Cancelled,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Percentage complete, 0–100.
    pub progress: u8,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Projects a fresh data directory starts with.
pub fn seed_projects() -> Vec<Project> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        Project {
            id: "1".into(),
            title: "Website Redesign".into(),
            description: "Modernizing our company website with new design and features.".into(),
            status: ProjectStatus::Active,
            progress: 75,
            start_date: date(2024, 1, 15),
            end_date: Some(date(2024, 4, 15)),
        },
        Project {
            id: "2".into(),
            title: "Mobile App Development".into(),
            description: "Creating a new mobile app for our customers.".into(),
            status: ProjectStatus::OnHold,
            progress: 30,
            start_date: date(2024, 2, 1),
            end_date: None,
        },
        Project {
            id: "3".into(),
            title: "Data Migration".into(),
            description: "Migrating data from legacy systems to new cloud infrastructure.".into(),
            status: ProjectStatus::Completed,
            progress: 100,
            start_date: date(2024, 1, 1),
            end_date: Some(date(2024, 2, 28)),
        },
    ]
}

/// The persisted project list.
pub struct ProjectCatalog<S: SlotStore> {
    storage: S,
    projects: Vec<Project>,
}

impl<S: SlotStore> ProjectCatalog<S> {
    /// Load the catalog, falling back to the seed projects when the slot is
    /// missing or unreadable.
    pub fn load(storage: S) -> Self {
        let projects = match storage.get(PROJECTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "unparsable project catalog, using seed projects");
                seed_projects()
            }),
            Ok(None) => seed_projects(),
            Err(e) => {
                warn!(error = %e, "failed to read project catalog, using seed projects");
                seed_projects()
            }
        };
        ProjectCatalog { storage, projects }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Look up a project by id, or by case-insensitive title.
    pub fn resolve(&self, query: &str) -> Result<&Project> {
        self.get(query)
            .or_else(|| {
                self.projects
                    .iter()
                    .find(|p| p.title.eq_ignore_ascii_case(query.trim()))
            })
            .ok_or_else(|| Error::ProjectNotFound(query.to_string()))
    }

    /// Record a project's new progress and persist the catalog.
    pub fn set_progress(&mut self, id: &str, progress: u8) -> Result<()> {
        let progress = progress.min(100);
        let mut next = self.projects.clone();
        let project = next
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))?;
        if project.progress == progress {
            return Ok(());
        }
        project.progress = progress;
        let data = serde_json::to_string_pretty(&next)?;
        self.storage.put(PROJECTS_KEY, &data)?;
        debug!(project_id = id, progress, "project progress saved");
        self.projects = next;
        Ok(())
    }
}
