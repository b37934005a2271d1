//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four task statements over the `items` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the label before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - No statement is wrapped in a multi-statement transaction.

use crate::db::schema::{ITEMS_COLUMNS, ITEMS_TABLE};
use crate::db::DbError;
use crate::model::task::{validate_task_value, Task, TaskId, TaskValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, done, value FROM items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; initialize the store first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Lists tasks whose `done` flag equals `done`. Order is engine default.
    fn list_tasks(&self, done: bool) -> RepoResult<Vec<Task>>;
    /// Inserts a pending task and returns its assigned id.
    fn insert_task(&self, value: &str) -> RepoResult<TaskId>;
    /// Sets `done = 1`. Returns `false` when no row matched.
    fn complete_task(&self, id: TaskId) -> RepoResult<bool>;
    /// Removes the row. Returns `false` when no row matched.
    fn delete_task(&self, id: TaskId) -> RepoResult<bool>;
    /// Gets one task by id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Counts every row regardless of `done`.
    fn count_tasks(&self) -> RepoResult<u64>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `items` has not been created.
    /// - `MissingRequiredColumn` when `items` lacks `id`, `done` or `value`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_task_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Wraps a connection the caller has already checked with `try_new`.
    pub(crate) fn from_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self, done: bool) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE done = ?1;"))?;
        let mut rows = stmt.query([bool_to_int(done)])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn insert_task(&self, value: &str) -> RepoResult<TaskId> {
        validate_task_value(value)?;

        self.conn.execute(
            "INSERT INTO items (done, value) VALUES (0, ?1);",
            params![value],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn complete_task(&self, id: TaskId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("UPDATE items SET done = 1 WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn count_tasks(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;

    let done = match row.get::<_, Option<i64>>("done")? {
        Some(0) => false,
        Some(1) => true,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in items.done for id {id}"
            )));
        }
        None => {
            return Err(RepoError::InvalidData(format!(
                "null items.done for id {id}"
            )));
        }
    };

    let value = row.get::<_, Option<String>>("value")?.ok_or_else(|| {
        RepoError::InvalidData(format!("null items.value for id {id}"))
    })?;

    let task = Task { id, done, value };
    task.validate()
        .map_err(|_| RepoError::InvalidData(format!("empty items.value for id {id}")))?;
    Ok(task)
}

fn ensure_task_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, ITEMS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(ITEMS_TABLE));
    }

    for column in ITEMS_COLUMNS {
        if !table_has_column(conn, ITEMS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: ITEMS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name
             FROM sqlite_master
             WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
