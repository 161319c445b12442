//! Persisted mutations and their encoding as store writes.

use super::{SyncError, SyncResult};
use crate::settings::domain::Settings;
use crate::sync::domain::{
    CollectionKind, CollectionRef, DocumentFields, RESET_MARKER_DOCUMENT_ID, SETTINGS_DOCUMENT_ID,
    WriteOp,
};
use crate::task::domain::{Task, TaskId, UserId};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// One change the services ask the store to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Writes a complete new task document.
    CreateTask {
        /// Task identifier.
        id: TaskId,
        /// Encoded task.
        fields: DocumentFields,
    },
    /// Merges changed fields into an existing task document.
    UpdateTask {
        /// Task identifier.
        id: TaskId,
        /// Changed fields; `null` removes a field.
        fields: DocumentFields,
    },
    /// Removes a task document.
    DeleteTask(TaskId),
    /// Replaces the settings document.
    ReplaceSettings(DocumentFields),
    /// Records the local date of the last daily reset.
    RecordReset(NaiveDate),
}

impl Mutation {
    /// Encodes a new task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Encode`] when the task cannot be serialized.
    pub fn create_task(task: &Task) -> SyncResult<Self> {
        Ok(Self::CreateTask {
            id: task.id(),
            fields: encode(task)?,
        })
    }

    /// Encodes the fields that differ between two versions of a task.
    ///
    /// Returns `None` when nothing changed. Fields present before but absent
    /// after are written as `null` so the store removes them.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Encode`] when either task cannot be serialized.
    pub fn update_task(before: &Task, after: &Task) -> SyncResult<Option<Self>> {
        let previous = encode(before)?;
        let current = encode(after)?;

        let mut changed = DocumentFields::new();
        for (key, value) in &current {
            if previous.get(key) != Some(value) {
                changed.insert(key.clone(), value.clone());
            }
        }
        for key in previous.keys() {
            if !current.contains_key(key) {
                changed.insert(key.clone(), Value::Null);
            }
        }

        if changed.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::UpdateTask {
            id: after.id(),
            fields: changed,
        }))
    }

    /// Removes a task.
    #[must_use]
    pub const fn delete_task(id: TaskId) -> Self {
        Self::DeleteTask(id)
    }

    /// Encodes a complete settings document.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Encode`] when the settings cannot be serialized.
    pub fn replace_settings(settings: &Settings) -> SyncResult<Self> {
        Ok(Self::ReplaceSettings(encode(settings)?))
    }

    /// Records the local date of a daily reset.
    #[must_use]
    pub const fn record_reset(date: NaiveDate) -> Self {
        Self::RecordReset(date)
    }

    pub(super) fn into_write_op(self, owner: &UserId) -> WriteOp {
        let collection = |kind| CollectionRef::new(owner.clone(), kind);
        match self {
            Self::CreateTask { id, fields } => WriteOp::Put {
                collection: collection(CollectionKind::Tasks),
                id: id.to_string(),
                fields,
            },
            Self::UpdateTask { id, fields } => WriteOp::Merge {
                collection: collection(CollectionKind::Tasks),
                id: id.to_string(),
                fields,
            },
            Self::DeleteTask(id) => WriteOp::Delete {
                collection: collection(CollectionKind::Tasks),
                id: id.to_string(),
            },
            Self::ReplaceSettings(fields) => WriteOp::Put {
                collection: collection(CollectionKind::Settings),
                id: SETTINGS_DOCUMENT_ID.to_owned(),
                fields,
            },
            Self::RecordReset(date) => {
                let mut fields = DocumentFields::new();
                fields.insert(
                    "lastResetDate".to_owned(),
                    Value::String(date.format("%Y-%m-%d").to_string()),
                );
                WriteOp::Put {
                    collection: collection(CollectionKind::Meta),
                    id: RESET_MARKER_DOCUMENT_ID.to_owned(),
                    fields,
                }
            }
        }
    }
}

fn encode(value: &impl Serialize) -> SyncResult<DocumentFields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(SyncError::Encode(format!(
            "expected an object, got {other}"
        ))),
        Err(err) => Err(SyncError::Encode(err.to_string())),
    }
}
