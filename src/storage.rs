//! Durable key-value slots for boards and projects.
//!
//! A slot is one opaque text value addressed by a string key. Each project's
//! task list lives in its own slot (`project_<id>_tasks`), stored as a JSON
//! array of tasks. The `SlotStore` trait is the only way the core reaches
//! storage, so tests swap the file-backed store for `MemoryStore`.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::task::Task;

/// A durable string-keyed slot store.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's full contents.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage key of a project's task list.
pub fn tasks_key(project_id: &str) -> String {
    format!("project_{}_tasks", project_id)
}

/// Read a task list from a slot.
///
/// Absent, unreadable and unparsable slots all yield an empty list.
pub fn read_tasks<S: SlotStore + ?Sized>(store: &S, key: &str) -> Vec<Task> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(key, error = %e, "unparsable task slot, starting empty");
                Vec::new()
            }
        },
        Ok(None) => {
            debug!(key, "no task slot yet");
            Vec::new()
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read task slot, starting empty");
            Vec::new()
        }
    }
}

/// Serialize and write a full task list to a slot.
pub fn write_tasks<S: SlotStore + ?Sized>(store: &mut S, key: &str, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string_pretty(tasks)?;
    store.put(key, &data)
}

/// Slots stored as `<key>.json` files inside one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a slot. Keys are reduced to a file-name-safe form.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl SlotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let written = File::create(&tmp).and_then(|mut f| {
            f.write_all(value.as_bytes())?;
            f.flush()?;
            fs::rename(&tmp, &path)
        });
        if let Err(e) = written {
            // Never leave a half-written temp file next to the slot.
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

/// Convert a slot key to a safe file stem.
/// Keeps alphanumerics, `-` and `_`; everything else becomes `_`.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// In-memory slots, used by tests and throwaway boards.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with raw content, bypassing serialization.
    pub fn with_slot(mut self, key: &str, raw: &str) -> Self {
        self.slots.insert(key.to_string(), raw.to_string());
        self
    }

    /// Make every subsequent `put` fail, as a full disk would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "storage quota exceeded").into());
        }
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
