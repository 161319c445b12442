//! Failure taxonomy shared by every service error.
//!
//! Each service error maps onto one [`FailureKind`] so callers can decide how
//! to present a failure without matching on every concrete variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input was rejected before any write took place.
    Validation,
    /// A referenced identifier does not exist.
    NotFound,
    /// The operation would break a consistency rule (category in use, last
    /// category, malformed lane window, task not on the daily board).
    ConstraintViolation,
    /// The external lane classifier failed; the task is unchanged.
    ClassificationFailed,
    /// The backing store failed; the operation is considered not applied.
    SyncFailure,
    /// An import payload was malformed; nothing was changed.
    InvalidFormat,
}

impl FailureKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::ConstraintViolation => "constraint_violation",
            Self::ClassificationFailed => "classification_failed",
            Self::SyncFailure => "sync_failure",
            Self::InvalidFormat => "invalid_format",
        }
    }

    /// Returns `true` when retrying the same call may succeed without the
    /// caller changing its input.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::ClassificationFailed | Self::SyncFailure)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
