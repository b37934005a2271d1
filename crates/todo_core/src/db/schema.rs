//! Schema definition for the `items` table.
//!
//! # Invariants
//! - `initialize_schema` never drops or rewrites existing rows.
//! - `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
//! - Column set is fixed: `id`, `done`, `value`.

use super::DbResult;
use log::debug;
use rusqlite::Connection;

/// Name of the only table owned by the task store.
pub const ITEMS_TABLE: &str = "items";

/// Columns every reader/writer relies on.
pub const ITEMS_COLUMNS: [&str; 3] = ["id", "done", "value"];

const CREATE_ITEMS_SQL: &str = "CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    done INTEGER,
    value TEXT
);";

/// Creates the `items` table when missing.
///
/// Safe to call on every process start.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_ITEMS_SQL)?;
    debug!("event=schema_init module=db status=ok table={ITEMS_TABLE}");
    Ok(())
}
