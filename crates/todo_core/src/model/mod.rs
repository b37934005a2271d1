//! Domain model for to-do tasks.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//!
//! # Invariants
//! - Every task is identified by a store-assigned integer `TaskId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod task;
