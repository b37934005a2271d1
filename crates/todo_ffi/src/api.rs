//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task store operations to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The database path is always passed by the caller; nothing is cached here.
//! - Rejected input and unknown ids never write to the database.

use log::warn;
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    InsertOutcome, MutationOutcome, RepoResult, Task, TaskStore,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row rendered by the todo/completed lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub done: bool,
    pub value: String,
}

impl From<Task> for TodoItem {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            done: task.done,
            value: task.value,
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    /// Matching rows; empty on failure or when nothing matches.
    pub items: Vec<TodoItem>,
    /// Whether the query ran.
    pub ok: bool,
    /// Human-readable message for diagnostics.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the operation succeeded (unknown ids still count as success).
    pub ok: bool,
    /// Created task id, set by `todo_add` only.
    pub task_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, task_id: Option<i64>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Creates the `items` table in the database at `db_path` when missing.
///
/// `db_path` is used byte-for-byte; an empty path is rejected.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Call once at app start.
/// - Idempotent; never erases rows.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_init(db_path: String) -> TodoActionResponse {
    match with_store(&db_path, |store| store.initialize()) {
        Ok(()) => TodoActionResponse::success("Store ready.", None),
        Err(err) => TodoActionResponse::failure(format!("todo_init failed: {err}")),
    }
}

/// Lists tasks by completion flag.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Row order is unspecified.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list(db_path: String, done: bool) -> TodoListResponse {
    match with_store(&db_path, |store| store.list(done)) {
        Ok(tasks) => {
            let items = tasks.into_iter().map(TodoItem::from).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("Found {} task(s).", items.len())
            };
            TodoListResponse {
                items,
                ok: true,
                message,
            }
        }
        Err(err) => TodoListResponse {
            items: Vec::new(),
            ok: false,
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Adds a pending task.
///
/// # FFI contract
/// - `None` or empty text is rejected with `ok=false` and nothing is written.
/// - Text is stored as typed, without trimming.
/// - Callers re-run `todo_list` to see the new row.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(db_path: String, value: Option<String>) -> TodoActionResponse {
    match with_store(&db_path, |store| store.insert(value.as_deref())) {
        Ok(InsertOutcome::Inserted(id)) => TodoActionResponse::success("Task added.", Some(id)),
        Ok(InsertOutcome::Rejected) => {
            TodoActionResponse::failure("Task rejected: value is empty.")
        }
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Marks a task as done.
///
/// # FFI contract
/// - Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_complete(db_path: String, id: i64) -> TodoActionResponse {
    match with_store(&db_path, |store| store.complete(id)) {
        Ok(outcome) => TodoActionResponse::success(mutation_message("completed", outcome), None),
        Err(err) => TodoActionResponse::failure(format!("todo_complete failed: {err}")),
    }
}

/// Permanently deletes a task.
///
/// # FFI contract
/// - Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(db_path: String, id: i64) -> TodoActionResponse {
    match with_store(&db_path, |store| store.delete(id)) {
        Ok(outcome) => TodoActionResponse::success(mutation_message("deleted", outcome), None),
        Err(err) => TodoActionResponse::failure(format!("todo_delete failed: {err}")),
    }
}

fn mutation_message(verb: &str, outcome: MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Applied => format!("Task {verb}."),
        MutationOutcome::NotFound => format!("No task matched; nothing {verb}."),
    }
}

fn with_store<T>(db_path: &str, f: impl FnOnce(&TaskStore) -> RepoResult<T>) -> Result<T, String> {
    let store = TaskStore::open(db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("store open failed: {err}")
    })?;
    f(&store).map_err(|err| err.to_string())
}
