//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every statement binds inputs as positional parameters.
//! - Mutations on unknown ids report "nothing changed" instead of failing.

pub mod task_repo;
