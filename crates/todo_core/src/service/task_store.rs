//! Connection-owning task store.
//!
//! # Responsibility
//! - Hold the one SQLite connection used by the application context.
//! - Expose initialize/list/insert/complete/delete as plain request/response calls.
//!
//! # Invariants
//! - There is no process-wide store; owners pass `&TaskStore` explicitly.
//! - No operation triggers refresh callbacks. Callers re-list on their own.
//! - The `items` table check runs until it first succeeds, then is cached.

use crate::db::schema::initialize_schema;
use crate::db::{open_db, open_db_in_memory};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, SqliteTaskRepository};
use crate::service::task_service::{InsertOutcome, MutationOutcome, TaskService};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::path::Path;

/// Task store bound to one SQLite database.
pub struct TaskStore {
    conn: Connection,
    checked: OnceCell<()>,
}

impl TaskStore {
    /// Opens the database file at `path`, creating `items` when missing.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an existing connection without touching its schema.
    ///
    /// Call [`TaskStore::initialize`] before any other operation.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            checked: OnceCell::new(),
        }
    }

    /// Ensures the `items` table exists. Idempotent.
    pub fn initialize(&self) -> RepoResult<()> {
        initialize_schema(&self.conn)?;
        Ok(())
    }

    /// Lists tasks whose `done` flag equals `done`.
    pub fn list(&self, done: bool) -> RepoResult<Vec<Task>> {
        self.service()?.list(done)
    }

    /// Inserts a pending task unless `value` is empty or absent.
    pub fn insert(&self, value: Option<&str>) -> RepoResult<InsertOutcome> {
        self.service()?.add(value)
    }

    /// Marks the task as done. Unknown ids are a no-op.
    pub fn complete(&self, id: TaskId) -> RepoResult<MutationOutcome> {
        self.service()?.complete(id)
    }

    /// Removes the task permanently. Unknown ids are a no-op.
    pub fn delete(&self, id: TaskId) -> RepoResult<MutationOutcome> {
        self.service()?.delete(id)
    }

    /// Reads one task back by id.
    pub fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.service()?.get(id)
    }

    /// Borrows the underlying connection for diagnostics (row dumps, pragmas).
    ///
    /// Task rows should only be changed through the store operations.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn service(&self) -> RepoResult<TaskService<SqliteTaskRepository<'_>>> {
        self.checked
            .get_or_try_init(|| SqliteTaskRepository::try_new(&self.conn).map(|_| ()))?;
        Ok(TaskService::new(SqliteTaskRepository::from_checked(&self.conn)))
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::repo::task_repo::RepoError;
    use rusqlite::Connection;

    #[test]
    fn readiness_check_is_cached_after_first_success() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.checked.get().is_none());

        store.list(false).unwrap();
        assert!(store.checked.get().is_some());
        store.insert(Some("cached")).unwrap();
        assert_eq!(store.list(false).unwrap().len(), 1);
    }

    #[test]
    fn failed_readiness_check_is_retried() {
        let store = TaskStore::from_connection(Connection::open_in_memory().unwrap());

        assert!(matches!(
            store.list(false),
            Err(RepoError::MissingRequiredTable("items"))
        ));
        assert!(store.checked.get().is_none());

        store.initialize().unwrap();
        assert!(store.list(false).unwrap().is_empty());
        assert!(store.checked.get().is_some());
    }
}
