//! Board session: task store, drag gesture and creation dialog, kept in sync
//! with storage.
//!
//! Every successful mutation runs one cycle, in order: re-project the store
//! into columns, bump the render revision (views are regenerated from the
//! projection), save the projection. Requests that change nothing (blank
//! title, unknown id, invalid column, drop onto the current column) skip the
//! cycle entirely.

pub mod drag;
pub mod modal;
pub mod projection;
pub mod store;

pub use drag::*;
pub use modal::*;
pub use projection::*;
pub use store::*;

use crate::models::{Column, TaskId};
use crate::repo::{BoardStorage, KeyValueStore, PersistedBoard, StorageError};

/// Result of a mutation request
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed; no render or save happened
    Unchanged,
    /// State changed and was saved
    Saved,
    /// State changed but the save was rejected; the board stays usable
    SaveFailed(StorageError),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Outcome::Unchanged)
    }

    pub fn save_error(&self) -> Option<&StorageError> {
        match self {
            Outcome::SaveFailed(e) => Some(e),
            _ => None,
        }
    }
}

pub struct Board<S: KeyValueStore> {
    store: TaskStore,
    storage: BoardStorage<S>,
    drag: DragSession,
    modal: CreationModal,
    revision: u64,
    persistence_degraded: bool,
    backend_unavailable: bool,
}

impl<S: KeyValueStore> Board<S> {
    /// Open a board over `backend`, starting empty when nothing usable is stored
    pub fn load(backend: S) -> Self {
        let storage = BoardStorage::new(backend);
        let store = match storage.load() {
            Some(saved) => TaskStore::from_persisted(&saved),
            None => TaskStore::new(),
        };
        Self {
            store,
            storage,
            drag: DragSession::new(),
            modal: CreationModal::new(),
            revision: 0,
            persistence_degraded: false,
            backend_unavailable: false,
        }
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.store
    }

    pub fn projection(&self) -> Projection<'_> {
        project(self.store.all())
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn modal(&self) -> &CreationModal {
        &self.modal
    }

    /// Dialog visibility and fields; these never touch the task store
    pub fn modal_mut(&mut self) -> &mut CreationModal {
        &mut self.modal
    }

    pub fn storage(&self) -> &BoardStorage<S> {
        &self.storage
    }

    /// Close the session, handing back the key-value backend
    pub fn into_backend(self) -> S {
        self.storage.into_inner()
    }

    /// Number of render cycles run so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True while the most recent save was rejected, or for the whole session
    /// once the backend is known not to persist anything
    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded || self.backend_unavailable
    }

    /// Flag a backend that accepts writes but keeps nothing past this
    /// session (the in-memory fallback). Successful saves do not clear it.
    pub fn mark_persistence_degraded(&mut self) {
        self.backend_unavailable = true;
    }

    /// Add a To Do task. `None` when the title is blank.
    pub fn create(&mut self, title: &str, description: &str) -> Option<(TaskId, Outcome)> {
        let id = self.store.create(title, description)?;
        Some((id, self.sync()))
    }

    /// Submit the creation dialog. The dialog is cleared and closed whether or
    /// not a task was created.
    pub fn submit_modal(&mut self) -> Option<(TaskId, Outcome)> {
        let input = self.modal.submit();
        self.create(&input.title, &input.description)
    }

    pub fn delete(&mut self, id: TaskId) -> Outcome {
        if self.store.delete(id) {
            self.sync()
        } else {
            Outcome::Unchanged
        }
    }

    /// Start dragging a card. Returns `false` if there is no such card.
    pub fn drag_start(&mut self, id: TaskId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        if let Some(previous) = self.drag.start(id) {
            log::debug!("Drag source {} replaced by {}", previous, id);
        }
        true
    }

    pub fn drag_enter(&mut self, column: Column) {
        self.drag.enter(column);
    }

    pub fn drag_leave(&mut self, column: Column) {
        self.drag.leave(column);
    }

    /// End the drag gesture without dropping
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Drop the dragged card on `column`
    pub fn drop_on(&mut self, column: Column) -> Outcome {
        let moved = match self.drag.drop_on(column) {
            Some(id) => self.store.move_to(id, column),
            None => false,
        };
        if moved {
            self.sync()
        } else {
            Outcome::Unchanged
        }
    }

    /// Drop on a column given by identifier. Unknown identifiers end the
    /// gesture without moving anything.
    pub fn drop_on_named(&mut self, column_id: &str) -> Outcome {
        match Column::from_str(column_id) {
            Some(column) => self.drop_on(column),
            None => {
                log::debug!("Drop on unknown column '{}' ignored", column_id);
                self.drag.cancel();
                Outcome::Unchanged
            }
        }
    }

    /// Drag a card and drop it on `column` in one step
    pub fn move_task(&mut self, id: TaskId, column: Column) -> Outcome {
        if !self.drag_start(id) {
            return Outcome::Unchanged;
        }
        self.drop_on(column)
    }

    fn sync(&mut self) -> Outcome {
        let snapshot = PersistedBoard::from(&self.projection());
        self.revision += 1;
        match self.storage.save(&snapshot) {
            Ok(()) => {
                log::debug!("Saved board revision {} ({} task(s))", self.revision, snapshot.total());
                self.persistence_degraded = false;
                Outcome::Saved
            }
            Err(e) => {
                log::warn!("Board changes not saved: {}", e);
                self.persistence_degraded = true;
                Outcome::SaveFailed(e)
            }
        }
    }
}
