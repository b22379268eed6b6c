//! Domain layer: the in-memory store and its seed catalog.

pub mod seed;
mod store;

pub use store::{NewComment, NewTask, NewUser, TagChanges, TaskStore, UserChanges};
