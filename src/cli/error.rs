// Error handling utilities for consistent error messages and exit codes

use crate::models::{Column, TaskId};
use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, malformed arguments, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Print a non-fatal warning
pub fn warn_user(message: &str) {
    eprintln!("Warning: {}", message);
}

/// Validate that a task ID is valid (positive integer)
pub fn validate_task_id(id_str: &str) -> Result<TaskId, String> {
    id_str
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid task ID: '{}'. Task ID must be a number.", id_str))
        .and_then(|id| {
            if id > 0 {
                Ok(TaskId(id as u64))
            } else {
                Err(format!("Invalid task ID: {}. Task ID must be positive.", id))
            }
        })
}

/// Validate a column identifier
pub fn validate_column(name: &str) -> Result<Column, String> {
    Column::from_str(name).ok_or_else(|| {
        let valid: Vec<&str> = Column::ALL.iter().map(|c| c.as_str()).collect();
        format!("Unknown column '{}'. Valid columns: {}.", name, valid.join(", "))
    })
}
