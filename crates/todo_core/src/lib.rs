//! Core persistence for the to-do app.
//! This crate owns the `items` table and every rule about task rows.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::DEFAULT_DB_FILE_NAME;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{InsertOutcome, MutationOutcome, TaskService};
pub use service::task_store::TaskStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
