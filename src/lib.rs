//! TaskFlow - a three-column kanban board for the terminal
//!
//! This library provides the core functionality for TaskFlow, including:
//! - The task store, per-column projection and drag/drop session
//! - The new-task dialog
//! - Board persistence in a key-value store (SQLite-backed)
//! - CLI command parsing, board rendering and the interactive shell
//!
//! # Example
//!
//! ```
//! use taskflow::board::Board;
//! use taskflow::models::Column;
//! use taskflow::repo::MemoryStore;
//!
//! let mut board = Board::load(MemoryStore::new());
//! let (id, _) = board.create("Buy milk", "2%").unwrap();
//! board.move_task(id, Column::Progress);
//! assert_eq!(board.projection().count(Column::Progress), 1);
//! ```

pub mod board;
pub mod cli;
pub mod db;
pub mod models;
pub mod repo;
