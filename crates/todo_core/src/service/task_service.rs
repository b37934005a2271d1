//! Task use-case service.
//!
//! # Responsibility
//! - Provide the list/add/complete/delete entry points for core callers.
//! - Turn empty input and unknown ids into quiet outcomes, not errors.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Task labels are never written to logs.

use crate::model::task::{validate_task_value, Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::{debug, info, log_enabled, warn, Level};

/// Result of an add request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row written with the engine-assigned id.
    Inserted(TaskId),
    /// Input was empty or absent; nothing was written.
    Rejected,
}

impl InsertOutcome {
    /// Returns the new id when a row was written.
    pub fn task_id(self) -> Option<TaskId> {
        match self {
            Self::Inserted(id) => Some(id),
            Self::Rejected => None,
        }
    }
}

/// Result of a complete/delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// No row had the requested id. The table is unchanged.
    NotFound,
}

impl From<bool> for MutationOutcome {
    fn from(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::NotFound
        }
    }
}

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists tasks by completion flag.
    pub fn list(&self, done: bool) -> RepoResult<Vec<Task>> {
        let tasks = self.repo.list_tasks(done)?;
        debug!(
            "event=task_list module=service status=ok done={} count={}",
            done,
            tasks.len()
        );
        Ok(tasks)
    }

    /// Adds a pending task from user input.
    ///
    /// # Contract
    /// - `None` and `""` return `InsertOutcome::Rejected` without touching storage.
    /// - Callers re-list to observe the new row.
    pub fn add(&self, value: Option<&str>) -> RepoResult<InsertOutcome> {
        let Some(value) = value.filter(|text| validate_task_value(text).is_ok()) else {
            debug!("event=task_insert module=service status=rejected reason=empty_value");
            return Ok(InsertOutcome::Rejected);
        };

        let id = self.repo.insert_task(value)?;
        info!("event=task_insert module=service status=ok task_id={id}");
        if log_enabled!(Level::Debug) {
            match self.repo.count_tasks() {
                Ok(total) => debug!("event=task_table module=service status=ok total_rows={total}"),
                Err(err) => warn!("event=task_table module=service status=error error={err}"),
            }
        }
        Ok(InsertOutcome::Inserted(id))
    }

    /// Marks a task as done.
    pub fn complete(&self, id: TaskId) -> RepoResult<MutationOutcome> {
        let outcome = MutationOutcome::from(self.repo.complete_task(id)?);
        info!("event=task_complete module=service status={outcome:?} task_id={id}");
        Ok(outcome)
    }

    /// Permanently removes a task.
    pub fn delete(&self, id: TaskId) -> RepoResult<MutationOutcome> {
        let outcome = MutationOutcome::from(self.repo.delete_task(id)?);
        info!("event=task_delete module=service status={outcome:?} task_id={id}");
        Ok(outcome)
    }

    /// Gets one task by id.
    pub fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{InsertOutcome, MutationOutcome, TaskService};
    use crate::model::task::{Task, TaskId};
    use crate::repo::task_repo::{RepoResult, TaskRepository};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryRepo {
        rows: RefCell<Vec<Task>>,
        inserts: RefCell<u32>,
    }

    impl TaskRepository for MemoryRepo {
        fn list_tasks(&self, done: bool) -> RepoResult<Vec<Task>> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|task| task.done == done)
                .cloned()
                .collect())
        }

        fn insert_task(&self, value: &str) -> RepoResult<TaskId> {
            *self.inserts.borrow_mut() += 1;
            let id = TaskId::from(*self.inserts.borrow());
            self.rows.borrow_mut().push(Task {
                id,
                done: false,
                value: value.to_string(),
            });
            Ok(id)
        }

        fn complete_task(&self, id: TaskId) -> RepoResult<bool> {
            let mut rows = self.rows.borrow_mut();
            match rows.iter_mut().find(|task| task.id == id) {
                Some(task) => {
                    task.done = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        fn delete_task(&self, id: TaskId) -> RepoResult<bool> {
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|task| task.id != id);
            Ok(rows.len() != before)
        }

        fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
            Ok(self.rows.borrow().iter().find(|task| task.id == id).cloned())
        }

        fn count_tasks(&self) -> RepoResult<u64> {
            Ok(self.rows.borrow().len() as u64)
        }
    }

    #[test]
    fn add_rejects_empty_and_absent_input_without_repo_call() {
        let service = TaskService::new(MemoryRepo::default());

        assert_eq!(service.add(None).unwrap(), InsertOutcome::Rejected);
        assert_eq!(service.add(Some("")).unwrap(), InsertOutcome::Rejected);
        assert_eq!(*service.repo.inserts.borrow(), 0);
    }

    #[test]
    fn add_returns_assigned_id() {
        let service = TaskService::new(MemoryRepo::default());

        let outcome = service.add(Some("water plants")).unwrap();
        assert_eq!(outcome.task_id(), Some(1));
        assert_eq!(service.list(false).unwrap().len(), 1);
    }

    #[test]
    fn complete_and_delete_report_not_found_for_unknown_id() {
        let service = TaskService::new(MemoryRepo::default());

        assert_eq!(service.complete(99).unwrap(), MutationOutcome::NotFound);
        assert_eq!(service.delete(99).unwrap(), MutationOutcome::NotFound);
    }
}
