//! In-memory task tracking domain.
//!
//! This crate provides:
//! - Task entities with a four-state lifecycle (todo, in progress,
//!   blocked, done) and per-kind effort estimation (bug, feature,
//!   documentation, generic)
//! - Tag, user and comment entities referenced by id
//! - An in-memory [`TaskStore`](domain::TaskStore) enforcing referential
//!   integrity across its collections (cascading deletes, id generation)
//! - Serializable snapshots of tasks and comments
//!
//! The store is synchronous and single-threaded: every mutation happens
//! inline on the calling thread, so a read always observes the fully
//! applied result of the preceding write.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod domain;
pub mod entities;
pub mod errors;

pub use config::TaskboardConfig;
pub use domain::{NewComment, NewTask, NewUser, TagChanges, TaskStore, UserChanges};
pub use entities::{
    BugSeverity, Comment, Tag, TagCategory, Task, TaskKind, TaskPriority, TaskStatus, User,
};
pub use errors::{TaskboardError, TaskboardResult};
