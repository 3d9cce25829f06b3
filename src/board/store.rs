use crate::models::{Column, Task, TaskId};
use crate::repo::PersistedBoard;

/// In-memory task collection; the single source of truth for a session.
///
/// Tasks are kept in insertion order. Ids come from a monotonic counter and
/// are never handed out twice, even after the task they named is deleted.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from its stored layout.
    ///
    /// Stored tasks carry no ids, so fresh ids are assigned in encounter order
    /// (To Do first, then In Progress, then Done).
    pub fn from_persisted(board: &PersistedBoard) -> Self {
        let mut store = Self::new();
        for (column, stored) in board.iter() {
            let title = single_line(&stored.title);
            if title.is_empty() {
                log::warn!("Skipping stored task with empty title in '{}'", column);
                continue;
            }
            let id = store.allocate_id();
            let mut task = Task::new(id, title, stored.description.clone());
            task.status = column;
            store.tasks.push(task);
        }
        store
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new To Do task. Returns `None` (and changes nothing) when the
    /// title is blank. Line breaks in the title become single spaces.
    pub fn create(&mut self, title: &str, description: &str) -> Option<TaskId> {
        let title = single_line(title);
        if title.is_empty() {
            log::debug!("Ignoring task with empty title");
            return None;
        }
        let id = self.allocate_id();
        self.tasks
            .push(Task::new(id, title, description.trim().to_string()));
        log::debug!("Created task {}", id);
        Some(id)
    }

    /// Remove a task. Unknown ids are a no-op.
    pub fn delete(&mut self, id: TaskId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.tasks.remove(idx);
                log::debug!("Deleted task {}", id);
                true
            }
            None => false,
        }
    }

    /// Reassign a task's column.
    ///
    /// Returns `false` for unknown ids and when the task is already in
    /// `column`; the task keeps its place in the collection either way.
    pub fn move_to(&mut self, id: TaskId, column: Column) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.status != column => {
                log::debug!("Moved task {} from {} to {}", id, task.status, column);
                task.status = column;
                true
            }
            _ => false,
        }
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

/// Titles are one line: trimmed, with each line break folded into a space
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
