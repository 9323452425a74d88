//! # PB - Project Task Board
//!
//! A per-project kanban board with four fixed columns (To Do, In Progress,
//! In Review, Done), usable from the command line or an interactive TUI.
//!
//! ## Key Features
//!
//! - **Durable boards**: each project's task list lives in its own JSON slot
//!   and is rewritten in full after every change.
//! - **Drag-and-drop moves**: pick a card up and drop it on another column,
//!   by keyboard or mouse. Dropping outside the board does nothing.
//! - **Derived views**: columns and project progress are recomputed by
//!   listeners on the task store after each change.
//! - **Task editor**: title, description, priority, assignee, due date
//!   (natural language accepted) and labels.
//!
//! ## Quick Start
//!
//! ```bash
//! # Show projects and their progress
//! pb projects
//!
//! # Add a task to the first project's To Do column
//! pb add 1 "Draft landing page copy" --label design --due "next friday"
//!
//! # Open the board
//! pb board "Website Redesign"
//! ```
//!
//! Data is stored in `~/.pb/` (or `--dir` / `$PB_DIR`), one JSON file per
//! project board plus `projects.json`.

pub mod board;
pub mod cli;
pub mod cmd;
pub mod columns;
pub mod config;
pub mod dates;
pub mod editor;
pub mod error;
pub mod fields;
pub mod input;
pub mod progress;
pub mod project;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod user;
pub mod tui {
    pub mod colors;
    pub mod task_form;
    pub mod workflow;
    pub mod workflow_run;
}
