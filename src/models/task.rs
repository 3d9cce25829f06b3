use serde::{Deserialize, Serialize};
use std::fmt;

/// Board column a task lives in.
///
/// The three columns are fixed; a task is always in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Todo,
    Progress,
    Done,
}

impl Column {
    /// All columns in board order (left to right)
    pub const ALL: [Column; 3] = [Column::Todo, Column::Progress, Column::Done];

    /// Identifier used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::Progress => "progress",
            Column::Done => "done",
        }
    }

    /// Human-readable heading
    pub fn label(&self) -> &'static str {
        match self {
            Column::Todo => "To Do",
            Column::Progress => "In Progress",
            Column::Done => "Done",
        }
    }

    /// Parse a column identifier. Returns `None` for anything that is not one
    /// of the three columns.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" | "to_do" => Some(Column::Todo),
            "progress" | "in-progress" | "in_progress" | "inprogress" | "doing" => Some(Column::Progress),
            "done" => Some(Column::Done),
            _ => None,
        }
    }

    /// Position of the column on the board (0..3)
    pub fn index(&self) -> usize {
        match self {
            Column::Todo => 0,
            Column::Progress => 1,
            Column::Done => 2,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task identifier, unique within a board session and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task card model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: Column,
}

impl Task {
    /// Create a new task in the To Do column
    pub fn new(id: TaskId, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            status: Column::Todo,
        }
    }
}
