//! Command implementations for the CLI interface.
//!
//! Each handler opens the project's board, goes through the same board,
//! editor and store operations the TUI uses, and prints a short result.

use std::io;
use std::path::Path;

use chrono::{Local, Utc};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::board::{Board, BoardEffect, BoardIntent, DropTarget};
use crate::cli::Cli;
use crate::columns::Column;
use crate::dates::format_due_relative;
use crate::editor::{EditorOutcome, TaskEditor};
use crate::error::{Error, Result};
use crate::fields::*;
use crate::input::InputField;
use crate::project::ProjectCatalog;
use crate::session::Session;
use crate::storage::FileStore;
use crate::task::Task;
use crate::tui::workflow_run::run_board_tui;
use crate::user;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive kanban board for a project.
    Board {
        /// Project ID or title.
        project: String,
    },

    /// List projects with their progress.
    Projects,

    /// List users tasks can be assigned to.
    Users,

    /// Print a project's board, column by column.
    List {
        /// Project ID or title.
        project: String,
    },

    /// Add a new task to a column.
    Add {
        /// Project ID or title.
        project: String,
        /// Short title for the task.
        title: String,
        /// Target column: todo | in-progress | review | done.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        column: Status,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Assignee user ID.
        #[arg(long)]
        assignee: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", "next friday".
        #[arg(long)]
        due: Option<String>,
        /// Label. May be repeated.
        #[arg(long = "label")]
        labels: Vec<String>,
    },

    /// Update fields on a task.
    Edit {
        /// Project ID or title.
        project: String,
        /// Task ID, ID prefix or title.
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        due: Option<String>,
        /// Clear the due date.
        #[arg(long)]
        clear_due: bool,
        /// Unassign the task.
        #[arg(long)]
        clear_assignee: bool,
        /// Add a label. May be repeated.
        #[arg(long = "add-label")]
        add_labels: Vec<String>,
        /// Remove a label. May be repeated.
        #[arg(long = "rm-label")]
        rm_labels: Vec<String>,
    },

    /// Move a task to another column.
    Move {
        /// Project ID or title.
        project: String,
        /// Task ID, ID prefix or title.
        task: String,
        /// Destination column.
        #[arg(value_enum)]
        column: Status,
    },

    /// Delete a task. There is no undo.
    Delete {
        /// Project ID or title.
        project: String,
        /// Task ID, ID prefix or title.
        task: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Dispatch a parsed command.
pub fn run(command: Commands, data_dir: &Path) -> Result<()> {
    match command {
        Commands::Board { project } => cmd_board(data_dir, &project),
        Commands::Projects => cmd_projects(data_dir),
        Commands::Users => cmd_users(),
        Commands::List { project } => cmd_list(data_dir, &project),
        Commands::Add { project, title, column, desc, priority, assignee, due, labels } => {
            cmd_add(data_dir, &project, title, column, desc, priority, assignee, due, labels)
        }
        Commands::Edit {
            project, task, title, desc, priority, assignee, due, clear_due, clear_assignee,
            add_labels, rm_labels,
        } => cmd_edit(
            data_dir, &project, &task, title, desc, priority, assignee, due, clear_due,
            clear_assignee, add_labels, rm_labels,
        ),
        Commands::Move { project, task, column } => cmd_move(data_dir, &project, &task, column),
        Commands::Delete { project, task } => cmd_delete(data_dir, &project, &task),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Launch the terminal board.
pub fn cmd_board(data_dir: &Path, project: &str) -> Result<()> {
    let session = Session::open_dir(data_dir, project)?;
    run_board_tui(session)
}

/// List all projects with a progress bar.
pub fn cmd_projects(data_dir: &Path) -> Result<()> {
    let catalog = ProjectCatalog::load(FileStore::new(data_dir));
    println!("{:<4} {:<26} {:<10} {:<24} {}", "ID", "Title", "Status", "Progress", "Dates");
    for p in catalog.list() {
        let dates = match p.end_date {
            Some(end) => format!("{} → {}", p.start_date, end),
            None => format!("{} →", p.start_date),
        };
        println!(
            "{:<4} {:<26} {:<10} {:<24} {}",
            p.id,
            truncate(&p.title, 26),
            p.status.label(),
            format!("{} {:>3}%", progress_bar(p.progress, 16), p.progress),
            dates
        );
    }
    Ok(())
}

/// List the user directory.
pub fn cmd_users() -> Result<()> {
    println!("{:<4} {:<20} {:<10} {}", "ID", "Name", "Role", "Email");
    for u in user::directory() {
        println!("{:<4} {:<20} {:<10} {}", u.id, u.name, format!("{:?}", u.role).to_lowercase(), u.email);
    }
    Ok(())
}

/// Print the four columns of a board.
pub fn cmd_list(data_dir: &Path, project: &str) -> Result<()> {
    let session = Session::open_dir(data_dir, project)?;
    if let Some(p) = session.project() {
        println!("{} [{}] {}%", p.title, p.status.label(), p.progress);
    }
    let view = session.columns.borrow();
    for column in view.columns() {
        print_column(column);
    }
    Ok(())
}

/// Add a new task through the editor.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    data_dir: &Path,
    project: &str,
    title: String,
    column: Status,
    desc: Option<String>,
    priority: Priority,
    assignee: Option<String>,
    due: Option<String>,
    labels: Vec<String>,
) -> Result<()> {
    let mut session = Session::open_dir(data_dir, project)?;
    let mut board = Board::new();
    let BoardEffect::OpenEditor(mut editor) =
        board.dispatch(BoardIntent::Add { column }, &mut session.store)?
    else {
        return Err(Error::InvalidArgument("board did not open an editor".into()));
    };

    editor.title = InputField::with_value(&title);
    editor.description = InputField::with_value(desc.as_deref().unwrap_or_default());
    editor.set_priority(priority);
    editor.set_assignee(assignee);
    editor.due_date = InputField::with_value(due.as_deref().unwrap_or_default());
    add_labels(&mut editor, &labels);

    let outcome = editor.submit(session.project_id(), Utc::now())?;
    let id = match &outcome {
        EditorOutcome::Create(task) => task.id.clone(),
        EditorOutcome::Update { id, .. } => id.clone(),
    };
    session.store.commit(outcome)?;
    println!("Added task {} to {}", short_id(&id), column.title());
    Ok(())
}

/// Edit fields of an existing task.
#[allow(clippy::too_many_arguments)]
pub fn cmd_edit(
    data_dir: &Path,
    project: &str,
    task: &str,
    title: Option<String>,
    desc: Option<String>,
    priority: Option<Priority>,
    assignee: Option<String>,
    due: Option<String>,
    clear_due: bool,
    clear_assignee: bool,
    add: Vec<String>,
    rm: Vec<String>,
) -> Result<()> {
    let mut session = Session::open_dir(data_dir, project)?;
    let task_id = session.store.resolve(task)?.id.clone();
    let mut board = Board::new();
    let BoardEffect::OpenEditor(mut editor) =
        board.dispatch(BoardIntent::Edit { task_id: task_id.clone() }, &mut session.store)?
    else {
        return Err(Error::TaskNotFound(task.to_string()));
    };

    if let Some(title) = title {
        editor.title = InputField::with_value(&title);
    }
    if let Some(desc) = desc {
        editor.description = InputField::with_value(&desc);
    }
    if let Some(priority) = priority {
        editor.set_priority(priority);
    }
    if clear_assignee {
        editor.set_assignee(None);
    } else if assignee.is_some() {
        editor.set_assignee(assignee);
    }
    if clear_due {
        editor.due_date.clear();
    } else if let Some(due) = due {
        editor.due_date = InputField::with_value(&due);
    }
    add_labels(&mut editor, &add);
    for label in &rm {
        match editor.labels.iter().position(|l| l == label.trim()) {
            Some(idx) => {
                editor.remove_label(idx);
            }
            None => eprintln!("Label '{}' not on task, skipping", label.trim()),
        }
    }

    let outcome = editor.submit(session.project_id(), Utc::now())?;
    session.store.commit(outcome)?;
    println!("Updated task {}", short_id(&task_id));
    Ok(())
}

/// Move a task as if it had been dragged onto `column`.
pub fn cmd_move(data_dir: &Path, project: &str, task: &str, column: Status) -> Result<()> {
    let mut session = Session::open_dir(data_dir, project)?;
    let (task_id, source) = {
        let t = session.store.resolve(task)?;
        (t.id.clone(), t.status)
    };
    let mut board = Board::new();
    board.begin_drag(source, &task_id);
    if let Some(intent) = board.drop(Some(DropTarget::column(column))) {
        board.dispatch(BoardIntent::Move(intent), &mut session.store)?;
    }
    println!("Moved task {} from {} to {}", short_id(&task_id), source.title(), column.title());
    if let Some(p) = session.project() {
        println!("Project progress: {}%", p.progress);
    }
    Ok(())
}

/// Delete a task immediately.
pub fn cmd_delete(data_dir: &Path, project: &str, task: &str) -> Result<()> {
    let mut session = Session::open_dir(data_dir, project)?;
    let task_id = session.store.resolve(task)?.id.clone();
    let mut board = Board::new();
    match board.dispatch(BoardIntent::Delete { task_id: task_id.clone() }, &mut session.store)? {
        BoardEffect::Changed => println!("Deleted task {}", short_id(&task_id)),
        _ => println!("Task {} was already gone", short_id(&task_id)),
    }
    Ok(())
}

/// Generate shell completions.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "pb", &mut io::stdout());
}

fn add_labels(editor: &mut TaskEditor, labels: &[String]) {
    for label in labels {
        editor.label_input = InputField::with_value(label);
        editor.confirm_label();
    }
    editor.label_input.clear();
}

fn print_column(column: &Column) {
    println!();
    println!("{} ({})", column.title, column.tasks.len());
    if column.tasks.is_empty() {
        println!("  -");
        return;
    }
    let today = Local::now().date_naive();
    for t in &column.tasks {
        print_task_row(t, today);
    }
}

fn print_task_row(t: &Task, today: chrono::NaiveDate) {
    let labels = if t.labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", t.labels.join(","))
    };
    println!(
        "  {:<8} {:<6} {:<10} {:<18} {}{}",
        short_id(&t.id),
        t.priority.label(),
        format_due_relative(t.due_date, today),
        truncate(&user::display_name(user::directory(), t.assignee.as_deref()), 18),
        t.title,
        labels
    );
}

/// First eight characters of an id, enough to resolve it again.
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map(|(i, _)| &id[..i]).unwrap_or(id)
}

/// Render a percentage as a fixed-width bar.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (progress.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
