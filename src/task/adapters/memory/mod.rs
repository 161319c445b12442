//! In-memory lane classifiers for local sessions and tests.

mod classifier;

pub use classifier::{KeywordLaneClassifier, ScriptedLaneClassifier};
