//! Classifier port suggesting a lane from a task's text.

use crate::task::domain::Lane;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lane classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// External collaborator that maps task text to a time-of-day lane.
#[async_trait]
pub trait LaneClassifier: Send + Sync {
    /// Suggests a lane for the given task text.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when no suggestion can be produced.
    async fn classify(&self, text: &str) -> ClassifierResult<Lane>;
}

/// Errors returned by lane classifier implementations.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// The classifier was given nothing to work with.
    #[error("classifier input is empty")]
    EmptyInput,

    /// The classifier answered with something that is not a lane.
    #[error("classifier returned an unrecognised lane: {0}")]
    UnrecognisedLane(String),

    /// The classifier could not reach a decision for the text.
    #[error("classifier could not place the task: {0}")]
    Undecided(String),

    /// Backend or transport failure.
    #[error("classifier backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClassifierError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
