//! Core data structures for task tracking.

mod comment;
mod kind;
mod tag;
mod task;
mod user;

pub use comment::{Comment, CommentId, CommentSnapshot};
pub use kind::{BugDetails, BugSeverity, DocumentationDetails, FeatureDetails, TaskKind};
pub use tag::{Tag, TagCategory, TagId};
pub use task::{KindSnapshotFields, Task, TaskId, TaskPriority, TaskSnapshot, TaskStatus};
pub use user::{User, UserId};
