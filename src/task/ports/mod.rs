//! Port contracts for the task engine.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod classifier;

pub use classifier::{ClassifierError, ClassifierResult, LaneClassifier};
