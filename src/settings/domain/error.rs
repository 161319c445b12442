//! Error types for settings validation.

use super::{CategoryId, WeightFactor};
use crate::error::FailureKind;
use crate::task::domain::Lane;
use thiserror::Error;

/// Errors returned while constructing or mutating settings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsDomainError {
    /// The category identifier is empty after trimming.
    #[error("category id must not be empty")]
    EmptyCategoryId,

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// Another category already uses the name (case-insensitive).
    #[error("a category named '{0}' already exists")]
    DuplicateCategoryName(String),

    /// Two categories share an identifier.
    #[error("duplicate category id: {0}")]
    DuplicateCategoryId(CategoryId),

    /// The color is not `#` followed by six hex digits.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// No category has the given identifier.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Tasks still reference the category.
    #[error("category {category_id} is used by {task_count} task(s)")]
    CategoryInUse {
        /// Category that was to be removed.
        category_id: CategoryId,
        /// Number of referencing tasks.
        task_count: usize,
    },

    /// The category is the only one left.
    #[error("category {0} is the last remaining category")]
    LastCategory(CategoryId),

    /// A settings document carried an empty category list.
    #[error("settings must define at least one category")]
    NoCategories,

    /// A lane window is malformed.
    #[error("invalid {lane} window {start}-{end}: expected 0 <= start < end <= 24")]
    InvalidRange {
        /// Lane whose window was rejected.
        lane: Lane,
        /// Requested start hour.
        start: i32,
        /// Requested end hour.
        end: i32,
    },

    /// A scoring weight is negative or not a finite number.
    #[error("{factor} weight must be a non-negative number, got {value}")]
    InvalidWeight {
        /// Offending weight.
        factor: WeightFactor,
        /// Rejected value.
        value: f64,
    },

    /// The daily hours objective is negative or not a finite number.
    #[error("daily hours objective must be a non-negative number, got {0}")]
    InvalidHoursObjective(f64),
}

impl SettingsDomainError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::CategoryNotFound(_) => FailureKind::NotFound,
            Self::CategoryInUse { .. } | Self::LastCategory(_) | Self::InvalidRange { .. } => {
                FailureKind::ConstraintViolation
            }
            Self::EmptyCategoryId
            | Self::EmptyCategoryName
            | Self::DuplicateCategoryName(_)
            | Self::DuplicateCategoryId(_)
            | Self::InvalidColor(_)
            | Self::NoCategories
            | Self::InvalidWeight { .. }
            | Self::InvalidHoursObjective(_) => FailureKind::Validation,
        }
    }
}
