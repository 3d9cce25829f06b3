use serde::{Deserialize, Serialize};
use crate::models::Column;
use crate::repo::kv::{KeyValueStore, StorageError};

/// Key under which the whole board is stored
pub const TASKS_KEY: &str = "tasks";

/// A task as stored: no id, no status (the column key implies it)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Stored board layout: `{"todo": [...], "progress": [...], "done": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoard {
    #[serde(default)]
    pub todo: Vec<PersistedTask>,
    #[serde(default)]
    pub progress: Vec<PersistedTask>,
    #[serde(default)]
    pub done: Vec<PersistedTask>,
}

impl PersistedBoard {
    pub fn column(&self, column: Column) -> &[PersistedTask] {
        match column {
            Column::Todo => &self.todo,
            Column::Progress => &self.progress,
            Column::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, column: Column) -> &mut Vec<PersistedTask> {
        match column {
            Column::Todo => &mut self.todo,
            Column::Progress => &mut self.progress,
            Column::Done => &mut self.done,
        }
    }

    /// Tasks in encounter order: columns left to right, array order within
    pub fn iter(&self) -> impl Iterator<Item = (Column, &PersistedTask)> + '_ {
        Column::ALL
            .into_iter()
            .flat_map(move |column| self.column(column).iter().map(move |task| (column, task)))
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.progress.len() + self.done.len()
    }
}

/// Loads and saves the board blob in a key-value store
pub struct BoardStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BoardStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the stored board.
    ///
    /// Returns `None` when nothing is stored, when the backend cannot be read,
    /// or when the stored text is not a board. None of these are fatal.
    pub fn load(&self) -> Option<PersistedBoard> {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No stored board under '{}'", TASKS_KEY);
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read stored board: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PersistedBoard>(&raw) {
            Ok(board) => {
                log::debug!("Loaded {} stored task(s)", board.total());
                Some(board)
            }
            Err(e) => {
                log::warn!("Ignoring malformed stored board: {}", e);
                None
            }
        }
    }

    /// Overwrite the stored board. In-memory state is the caller's concern.
    pub fn save(&mut self, board: &PersistedBoard) -> Result<(), StorageError> {
        let json = serde_json::to_string(board)?;
        self.store.set(TASKS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::kv::MemoryStore;

    fn task(title: &str, description: &str) -> PersistedTask {
        PersistedTask {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn storage_with(raw: &str) -> BoardStorage<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, raw).unwrap();
        BoardStorage::new(store)
    }

    #[test]
    fn test_load_absent() {
        let storage = BoardStorage::new(MemoryStore::new());
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_load_rejects_malformed() {
        assert_eq!(storage_with("not json").load(), None);
        assert_eq!(storage_with("[1, 2, 3]").load(), None);
        assert_eq!(storage_with("null").load(), None);
        assert_eq!(storage_with(r#"{"todo": "oops"}"#).load(), None);
        assert_eq!(storage_with(r#"{"todo": [{"description": "no title"}]}"#).load(), None);
    }

    #[test]
    fn test_load_fills_missing_columns_and_descriptions() {
        let board = storage_with(r#"{"progress": [{"title": "a"}], "archive": []}"#)
            .load()
            .unwrap();
        assert!(board.todo.is_empty());
        assert_eq!(board.progress, vec![task("a", "")]);
        assert!(board.done.is_empty());
    }

    #[test]
    fn test_saved_layout_has_exactly_three_keys() {
        let mut storage = BoardStorage::new(MemoryStore::new());
        let mut board = PersistedBoard::default();
        board.done.push(task("Ship", "v1"));
        storage.save(&board).unwrap();

        let raw = storage.store().get(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["todo"], serde_json::json!([]));
        assert_eq!(object["progress"], serde_json::json!([]));
        assert_eq!(object["done"], serde_json::json!([{"title": "Ship", "description": "v1"}]));
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = BoardStorage::new(MemoryStore::new());
        let mut board = PersistedBoard::default();
        board.todo.push(task("Buy milk", "2%"));
        board.todo.push(task("Call mom", ""));
        board.progress.push(task("Write report", "line one\nline two"));
        storage.save(&board).unwrap();
        storage.save(&board).unwrap();

        assert_eq!(storage.load(), Some(board));
    }

    #[test]
    fn test_save_surfaces_quota_error() {
        let mut storage = BoardStorage::new(MemoryStore::with_quota(8));
        let err = storage.save(&PersistedBoard::default()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    }

    #[test]
    fn test_iter_encounter_order() {
        let mut board = PersistedBoard::default();
        board.done.push(task("c", ""));
        board.todo.push(task("a", ""));
        board.progress.push(task("b", ""));

        let order: Vec<(Column, &str)> = board
            .iter()
            .map(|(column, t)| (column, t.title.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(Column::Todo, "a"), (Column::Progress, "b"), (Column::Done, "c")]
        );
        assert_eq!(board.total(), 3);
    }
}
