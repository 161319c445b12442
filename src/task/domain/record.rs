//! Persisted and exported shape of a task.

use super::{Attachment, Lane, PriorityParams, Task, TaskDomainError, TaskId, TaskStatus};
use crate::settings::domain::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document form of a [`Task`], as stored and as exported.
///
/// Status and completion timestamp are separate fields here; converting into
/// a [`Task`] rejects records where they disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier; generated when absent.
    #[serde(default)]
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Referenced category.
    pub category_id: CategoryId,
    /// Lane.
    #[serde(default, rename = "swimlane")]
    pub lane: Lane,
    /// Priority parameters.
    pub priority: PriorityParams,
    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Completion timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Daily-board membership.
    #[serde(default)]
    pub is_daily: bool,
    /// Estimated duration in minutes.
    #[serde(default, rename = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Ordered attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let title = record.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let completed_at = match (record.status, record.completed_at) {
            (TaskStatus::Completed, Some(at)) => Some(at),
            (TaskStatus::Todo, None) => None,
            (status, _) => return Err(TaskDomainError::CompletionMismatch { status }),
        };
        for attachment in &record.attachments {
            attachment.validate()?;
        }

        Ok(Self {
            id: record.id,
            title: title.to_owned(),
            description: record.description,
            category_id: record.category_id,
            lane: record.lane,
            priority: record.priority,
            tags: record.tags,
            deadline: record.deadline,
            created_at: record.created_at,
            completed_at,
            is_daily: record.is_daily,
            duration_minutes: record.duration_minutes,
            attachments: record.attachments,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let status = task.status();
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            category_id: task.category_id,
            lane: task.lane,
            priority: task.priority,
            tags: task.tags,
            deadline: task.deadline,
            created_at: task.created_at,
            status,
            completed_at: task.completed_at,
            is_daily: task.is_daily,
            duration_minutes: task.duration_minutes,
            attachments: task.attachments,
        }
    }
}
