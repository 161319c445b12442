//! Task aggregate root and related lifecycle types.

use super::{
    Attachment, Lane, ParseTaskStatusError, PriorityParams, TaskDomainError, TaskId, TaskRecord,
};
use crate::settings::domain::CategoryId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work remains.
    #[default]
    Todo,
    /// The task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated field values for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Non-empty title.
    pub title: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Category the task belongs to.
    pub category_id: CategoryId,
    /// Priority parameters.
    pub priority: PriorityParams,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Deadline used for deadline-urgency scoring.
    pub deadline: DateTime<Utc>,
    /// Estimated duration in minutes.
    pub duration_minutes: Option<u32>,
    /// Ordered attachments.
    pub attachments: Vec<Attachment>,
}

/// Task aggregate root.
///
/// Completion is stored as the completion timestamp itself, so a completed
/// task without `completed_at` cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub(super) id: TaskId,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) category_id: CategoryId,
    pub(super) lane: Lane,
    pub(super) priority: PriorityParams,
    pub(super) tags: Vec<String>,
    pub(super) deadline: DateTime<Utc>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) completed_at: Option<DateTime<Utc>>,
    pub(super) is_daily: bool,
    pub(super) duration_minutes: Option<u32>,
    pub(super) attachments: Vec<Attachment>,
}

impl Task {
    /// Creates a new pool task in the morning lane.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// attachment errors for malformed attachments.
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = normalize_title(&draft.title)?;
        for attachment in &draft.attachments {
            attachment.validate()?;
        }

        Ok(Self {
            id: TaskId::new(),
            title,
            description: draft.description,
            category_id: draft.category_id,
            lane: Lane::Morning,
            priority: draft.priority,
            tags: draft.tags,
            deadline: draft.deadline,
            created_at: clock.utc(),
            completed_at: None,
            is_daily: false,
            duration_minutes: draft.duration_minutes,
            attachments: draft.attachments,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the referenced category.
    #[must_use]
    pub const fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// Returns the lane. Only meaningful while the task is on the daily
    /// board or completed there.
    #[must_use]
    pub const fn lane(&self) -> Lane {
        self.lane
    }

    /// Returns the priority parameters.
    #[must_use]
    pub const fn priority(&self) -> PriorityParams {
        self.priority
    }

    /// Returns the ordered tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.completed_at.is_some() {
            TaskStatus::Completed
        } else {
            TaskStatus::Todo
        }
    }

    /// Returns the completion timestamp, present iff the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns `true` when the task is on the daily board.
    #[must_use]
    pub const fn is_daily(&self) -> bool {
        self.is_daily
    }

    /// Returns the estimated duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Returns the ordered attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns this task under a newly generated identifier.
    #[must_use]
    pub fn reissued(self) -> Self {
        Self {
            id: TaskId::new(),
            ..self
        }
    }

    /// Applies a field-level patch.
    ///
    /// Setting the status to completed stamps `completed_at` in the same
    /// call; an already completed task keeps its original timestamp.
    /// Reverting to todo clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or attachment errors. The task
    /// is unchanged on error.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        if let Some(attachments) = &patch.attachments {
            for attachment in attachments {
                attachment.validate()?;
            }
        }

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
        if let Some(value) = patch.category_id {
            self.category_id = value;
        }
        if let Some(value) = patch.priority {
            self.priority = value;
        }
        if let Some(value) = patch.tags {
            self.tags = value;
        }
        if let Some(value) = patch.deadline {
            self.deadline = value;
        }
        if let Some(value) = patch.duration_minutes {
            self.duration_minutes = value;
        }
        if let Some(value) = patch.attachments {
            self.attachments = value;
        }
        match patch.status {
            Some(TaskStatus::Completed) => self.complete(clock),
            Some(TaskStatus::Todo) => self.revert(),
            None => {}
        }
        Ok(())
    }

    /// Marks the task completed, stamping `completed_at` unless it is
    /// already completed.
    pub fn complete(&mut self, clock: &impl Clock) {
        if self.completed_at.is_none() {
            self.completed_at = Some(clock.utc());
        }
    }

    /// Returns the task to todo and clears `completed_at`.
    pub const fn revert(&mut self) {
        self.completed_at = None;
    }

    /// Moves a daily-board task to another lane. Moving to the current lane
    /// is allowed and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotOnDailyBoard`] for pool tasks.
    pub const fn move_to_lane(&mut self, lane: Lane) -> Result<(), TaskDomainError> {
        if !self.is_daily {
            return Err(TaskDomainError::NotOnDailyBoard(self.id));
        }
        self.lane = lane;
        Ok(())
    }

    /// Sets the lane regardless of board membership.
    pub const fn assign_lane(&mut self, lane: Lane) {
        self.lane = lane;
    }

    /// Puts the task on the daily board in the morning lane.
    ///
    /// Returns `false` and leaves the task untouched when it is already on
    /// the daily board.
    pub const fn promote_to_daily(&mut self) -> bool {
        if self.is_daily {
            return false;
        }
        self.is_daily = true;
        self.lane = Lane::Morning;
        true
    }

    /// Returns the task to the pool. Todo tasks go back to the morning
    /// lane; completed tasks keep the lane they were finished in.
    ///
    /// Returns `false` when the task was not on the daily board.
    pub const fn return_to_pool(&mut self) -> bool {
        if !self.is_daily {
            return false;
        }
        self.is_daily = false;
        if self.completed_at.is_none() {
            self.lane = Lane::Morning;
        }
        true
    }
}

fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

/// Field-level update for an existing task.
///
/// Lane and board membership are not patchable; they change only through
/// lane moves, promotion and the daily reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    category_id: Option<CategoryId>,
    priority: Option<PriorityParams>,
    tags: Option<Vec<String>>,
    deadline: Option<DateTime<Utc>>,
    duration_minutes: Option<Option<u32>>,
    attachments: Option<Vec<Attachment>>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another category.
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Replaces the priority parameters.
    #[must_use]
    pub const fn with_priority(mut self, priority: PriorityParams) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets or clears the estimated duration.
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: Option<u32>) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Replaces the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = Some(attachments.into_iter().collect());
        self
    }

    /// Sets the completion status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the new category, if the patch changes it.
    #[must_use]
    pub const fn category_id(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }
}
