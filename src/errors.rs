//! Error types for the taskboard crate.

use thiserror::Error;

use crate::entities::{TagId, TaskId, UserId};

/// Error types for taskboard operations.
///
/// Validation variants are returned by entity setters when input is
/// rejected; the prior field value is always retained in that case.
/// Not-found variants are hard failures raised by store operations that
/// require the referenced entity to exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskboardError {
    // Lookup errors
    #[error("task '{id}' not found")]
    TaskNotFound { id: TaskId },

    #[error("user '{id}' not found")]
    UserNotFound { id: UserId },

    #[error("tag '{id}' not found")]
    TagNotFound { id: TagId },

    // Validation errors
    #[error("title must be a non-empty string")]
    EmptyTitle,

    #[error("name must be a non-empty string")]
    EmptyName,

    #[error("invalid email address: '{email}'")]
    InvalidEmail { email: String },

    #[error("tag color must be a non-empty string")]
    EmptyColor,

    #[error("comment content must be a non-empty string")]
    EmptyContent,

    #[error("estimated hours must be non-negative, got {hours}")]
    NegativeHours { hours: f64 },

    #[error("complexity must be between 1 and 5, got {value}")]
    ComplexityOutOfRange { value: u8 },

    #[error("business value must be between 1 and 5, got {value}")]
    BusinessValueOutOfRange { value: u8 },

    #[error("page count must be positive, got {value}")]
    InvalidPageCount { value: f64 },

    // Kind errors
    #[error("operation applies to {expected} tasks, but task '{id}' is {actual}")]
    KindMismatch {
        id: TaskId,
        expected: &'static str,
        actual: &'static str,
    },

    // Parse errors
    #[error("invalid status: '{status}'")]
    InvalidStatus { status: String },

    #[error("invalid priority: '{priority}'")]
    InvalidPriority { priority: String },

    #[error("invalid severity: '{severity}'")]
    InvalidSeverity { severity: String },

    #[error("invalid tag category: '{category}'")]
    InvalidCategory { category: String },

    // Comment policy errors
    #[error("anonymous comments are disabled")]
    AnonymousCommentsDisabled,

    #[error("task '{id}' already has the maximum of {limit} comments")]
    CommentLimitReached { id: TaskId, limit: usize },
}

/// Result type alias for taskboard operations.
pub type TaskboardResult<T> = Result<T, TaskboardError>;
