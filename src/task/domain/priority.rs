//! Priority parameters attached to every task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three user-supplied priority factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFactor {
    /// How soon the task needs attention.
    Urgency,
    /// How much the task matters.
    Importance,
    /// How much completing the task changes.
    Impact,
}

impl PriorityFactor {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::Importance => "importance",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for PriorityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priority factor value in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PriorityLevel(u8);

impl PriorityLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 1;
    /// Highest accepted level.
    pub const MAX: u8 = 10;

    /// Creates a validated level for `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PriorityOutOfRange`] outside `1..=10`.
    pub fn new(factor: PriorityFactor, value: i64) -> Result<Self, TaskDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|level| (Self::MIN..=Self::MAX).contains(level))
            .map(Self)
            .ok_or(TaskDomainError::PriorityOutOfRange { factor, value })
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Urgency, importance and impact of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPriorityParams")]
pub struct PriorityParams {
    urgency: PriorityLevel,
    importance: PriorityLevel,
    impact: PriorityLevel,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawPriorityParams {
    urgency: i64,
    importance: i64,
    impact: i64,
}

impl PriorityParams {
    /// Level used for every factor when the caller supplies none.
    pub const DEFAULT_LEVEL: i64 = 5;

    /// Creates validated priority parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PriorityOutOfRange`] naming the first
    /// factor outside `1..=10`.
    pub fn new(urgency: i64, importance: i64, impact: i64) -> Result<Self, TaskDomainError> {
        Ok(Self {
            urgency: PriorityLevel::new(PriorityFactor::Urgency, urgency)?,
            importance: PriorityLevel::new(PriorityFactor::Importance, importance)?,
            impact: PriorityLevel::new(PriorityFactor::Impact, impact)?,
        })
    }

    /// Returns the urgency level.
    #[must_use]
    pub const fn urgency(self) -> PriorityLevel {
        self.urgency
    }

    /// Returns the importance level.
    #[must_use]
    pub const fn importance(self) -> PriorityLevel {
        self.importance
    }

    /// Returns the impact level.
    #[must_use]
    pub const fn impact(self) -> PriorityLevel {
        self.impact
    }
}

impl TryFrom<RawPriorityParams> for PriorityParams {
    type Error = TaskDomainError;

    fn try_from(raw: RawPriorityParams) -> Result<Self, Self::Error> {
        Self::new(raw.urgency, raw.importance, raw.impact)
    }
}
