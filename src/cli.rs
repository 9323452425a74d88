use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Project task board: a four-column kanban per project.
/// Boards are stored as JSON files in the data directory.
#[derive(Parser)]
#[command(name = "pb", version, about = "Project task board")]
pub struct Cli {
    /// Directory holding project and board files (default: ~/.pb).
    #[arg(long, global = true, env = "PB_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
