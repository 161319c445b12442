//! Error types for task domain validation and parsing.

use super::{PriorityFactor, TaskId, TaskStatus};
use crate::error::FailureKind;
use crate::settings::domain::CategoryId;
use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A priority factor lies outside `1..=10`.
    #[error("{factor} must be between 1 and 10, got {value}")]
    PriorityOutOfRange {
        /// Offending factor.
        factor: PriorityFactor,
        /// Rejected value.
        value: i64,
    },

    /// The task references a category missing from the settings.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// An attachment name is empty after trimming.
    #[error("attachment name must not be empty")]
    EmptyAttachmentName,

    /// A link attachment has no URL.
    #[error("link attachment URL must not be empty")]
    EmptyAttachmentUrl,

    /// A file attachment has no MIME type.
    #[error("file attachment MIME type must not be empty")]
    EmptyAttachmentMimeType,

    /// The stored status disagrees with the presence of `completedAt`.
    #[error("status {status} does not match the presence of completedAt")]
    CompletionMismatch {
        /// Status found in the record.
        status: TaskStatus,
    },

    /// Lanes can only be changed while the task is on the daily board.
    #[error("task {0} is not on the daily board")]
    NotOnDailyBoard(TaskId),
}

impl TaskDomainError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotOnDailyBoard(_) => FailureKind::ConstraintViolation,
            Self::EmptyTitle
            | Self::PriorityOutOfRange { .. }
            | Self::UnknownCategory(_)
            | Self::EmptyAttachmentName
            | Self::EmptyAttachmentUrl
            | Self::EmptyAttachmentMimeType
            | Self::CompletionMismatch { .. } => FailureKind::Validation,
        }
    }
}

/// Error returned while parsing a lane name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lane: {0}")]
pub struct ParseLaneError(pub String);

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
