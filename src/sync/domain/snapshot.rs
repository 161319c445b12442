//! Export and import snapshot.

use crate::settings::domain::Settings;
use crate::task::domain::Task;
use serde::{Deserialize, Serialize};

/// Complete state of one user: every task plus the settings.
///
/// This is both the result of loading a session and the backup document
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All tasks, pool and daily board alike.
    pub tasks: Vec<Task>,
    /// The settings aggregate.
    pub settings: Settings,
}

/// Outcome of a replace-all import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Tasks removed before the import.
    pub removed: usize,
    /// Tasks written by the import.
    pub imported: usize,
}
