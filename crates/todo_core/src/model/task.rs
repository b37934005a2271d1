//! Task domain model.
//!
//! # Responsibility
//! - Define the to-do record persisted in the `items` table.
//! - Own the validation rule for task labels.
//!
//! # Invariants
//! - `id` is assigned by SQLite and never reused for another task.
//! - `done` only transitions from `false` to `true`.
//! - `value` is never empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier (`items.id`).
pub type TaskId = i64;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Completion flag. Stored as `0`/`1`.
    pub done: bool,
    /// User-entered label.
    pub value: String,
}

/// Validation error for task labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyValue,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue => write!(f, "task value cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Validates invariants for a task read back from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_task_value(&self.value)
    }
}

/// Checks a label before it is handed to the store.
///
/// Only emptiness is checked. Whitespace-only labels are accepted as typed.
pub fn validate_task_value(value: &str) -> Result<(), TaskValidationError> {
    if value.is_empty() {
        return Err(TaskValidationError::EmptyValue);
    }
    Ok(())
}
