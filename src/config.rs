//! Data directory resolution.
//!
//! Boards and the project catalog live as JSON files in one directory:
//! `--dir`, else `$PB_DIR` (both handled by clap), else `$HOME/.pb`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Directory name used under `$HOME` when nothing else is configured.
pub const DEFAULT_DIR_NAME: &str = ".pb";

/// Pick the data directory and make sure it exists.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
