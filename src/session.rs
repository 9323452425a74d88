//! An open project board.
//!
//! Opening a board loads the project's task store and wires its derived
//! views: the column projection the front-ends render from, and the
//! progress aggregator that reports into the project catalog.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::columns::ColumnView;
use crate::error::Result;
use crate::progress::ProgressAggregator;
use crate::project::{Project, ProjectCatalog};
use crate::storage::{FileStore, SlotStore};
use crate::store::TaskStore;

pub struct Session<S: SlotStore> {
    pub store: TaskStore<S>,
    pub catalog: Rc<RefCell<ProjectCatalog<S>>>,
    pub columns: Rc<RefCell<ColumnView>>,
    project_id: String,
}

impl Session<FileStore> {
    /// Open the board of `project` (id or title) in `data_dir`.
    pub fn open_dir(data_dir: &Path, project: &str) -> Result<Self> {
        let storage = FileStore::new(data_dir);
        Session::open(storage.clone(), storage, project)
    }
}

impl<S: SlotStore + 'static> Session<S> {
    /// Open a board with separate handles for the catalog and the task slot.
    pub fn open(catalog_storage: S, task_storage: S, project: &str) -> Result<Self> {
        let catalog = ProjectCatalog::load(catalog_storage);
        let project_id = catalog.resolve(project)?.id.clone();
        let catalog = Rc::new(RefCell::new(catalog));

        let mut store = TaskStore::load(task_storage, &project_id);
        let columns = Rc::new(RefCell::new(ColumnView::new(&project_id)));
        store.subscribe(columns.clone());

        let sink = catalog.clone();
        let owner = project_id.clone();
        store.subscribe(ProgressAggregator::new(move |pct| {
            // The board change already landed; a failed progress write only
            // leaves the catalog stale.
            if let Err(e) = sink.borrow_mut().set_progress(&owner, pct) {
                warn!(project_id = %owner, error = %e, "failed to save project progress");
            }
        }));
        debug!(project_id = %project_id, tasks = store.len(), "board opened");

        Ok(Session { store, catalog, columns, project_id })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Current project record.
    pub fn project(&self) -> Option<Project> {
        self.catalog.borrow().get(&self.project_id).cloned()
    }
}
