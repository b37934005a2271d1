use rusqlite::Connection;
use todo_core::db::open_db_in_memory;
use todo_core::{RepoError, SqliteTaskRepository, TaskRepository, TaskValidationError};

#[test]
fn insert_assigns_increasing_ids_and_defaults_to_pending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.insert_task("first").unwrap();
    let second = repo.insert_task("second").unwrap();
    assert!(second > first);

    let loaded = repo.get_task(first).unwrap().unwrap();
    assert_eq!(loaded.id, first);
    assert!(!loaded.done);
    assert_eq!(loaded.value, "first");
}

#[test]
fn insert_rejects_empty_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.insert_task("").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyValue)
    ));
    assert_eq!(repo.count_tasks().unwrap(), 0);
}

#[test]
fn insert_binds_value_as_parameter() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let hostile = "x'); DROP TABLE items; --";
    let id = repo.insert_task(hostile).unwrap();

    assert_eq!(repo.get_task(id).unwrap().unwrap().value, hostile);
    assert_eq!(repo.count_tasks().unwrap(), 1);
}

#[test]
fn list_filters_by_done_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let pending = repo.insert_task("pending").unwrap();
    let finished = repo.insert_task("finished").unwrap();
    assert!(repo.complete_task(finished).unwrap());

    let todo = repo.list_tasks(false).unwrap();
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].id, pending);

    let done = repo.list_tasks(true).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, finished);
    assert!(done[0].done);
}

#[test]
fn list_returns_empty_vec_when_nothing_matches() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    assert!(repo.list_tasks(false).unwrap().is_empty());
    assert!(repo.list_tasks(true).unwrap().is_empty());
}

#[test]
fn complete_and_delete_report_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    repo.insert_task("keep").unwrap();

    assert!(!repo.complete_task(404).unwrap());
    assert!(!repo.delete_task(404).unwrap());
    assert_eq!(repo.count_tasks().unwrap(), 1);
    assert_eq!(repo.list_tasks(false).unwrap().len(), 1);
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = repo.insert_task("gone soon").unwrap();
    assert!(repo.delete_task(id).unwrap());

    assert!(repo.get_task(id).unwrap().is_none());
    assert!(!repo.delete_task(id).unwrap());
}

#[test]
fn insert_after_delete_never_duplicates_live_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.insert_task("a").unwrap();
    let second = repo.insert_task("b").unwrap();
    repo.delete_task(first).unwrap();
    let third = repo.insert_task("c").unwrap();

    assert_ne!(third, first);
    assert_ne!(third, second);
}

#[test]
fn deleting_highest_row_does_not_free_its_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.insert_task("a").unwrap();
    assert!(repo.delete_task(first).unwrap());
    let second = repo.insert_task("b").unwrap();

    assert_ne!(first, second);
    assert!(second > first);
}

#[test]
fn read_rejects_invalid_done_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO items (done, value) VALUES (7, 'odd');", [])
        .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = conn.last_insert_rowid();
    let err = repo.get_task(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("items.done")));
}

#[test]
fn read_rejects_empty_value_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    repo.insert_task("fine").unwrap();
    conn.execute("INSERT INTO items (done, value) VALUES (0, '');", [])
        .unwrap();

    let err = repo.list_tasks(false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("empty items.value")));
}

#[test]
fn read_rejects_null_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO items (done, value) VALUES (0, NULL);", [])
        .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = repo.list_tasks(false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("items.value")));
}

#[test]
fn repository_rejects_connection_without_items_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("items"))));
}

#[test]
fn repository_rejects_items_table_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE items (id INTEGER PRIMARY KEY NOT NULL, value TEXT);")
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "items",
            column: "done"
        })
    ));
}
