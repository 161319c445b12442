//! Task engine: lifecycle, lane movement, the daily board and the daily
//! rollover.

use super::rollover::{local_date, should_run_daily_reset};
use crate::error::FailureKind;
use crate::settings::domain::CategoryId;
use crate::sync::{
    ports::DocumentStore,
    services::{Mutation, SyncAdapter, SyncError},
};
use crate::task::{
    domain::{
        Attachment, Lane, PriorityParams, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch,
        TaskStatus,
    },
    ports::{ClassifierError, LaneClassifier},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    category_id: CategoryId,
    priority: (i64, i64, i64),
    tags: Vec<String>,
    deadline: DateTime<Utc>,
    duration_minutes: Option<u32>,
    attachments: Vec<Attachment>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields. Priority defaults to 5
    /// for every factor.
    #[must_use]
    pub fn new(title: impl Into<String>, category_id: CategoryId, deadline: DateTime<Utc>) -> Self {
        let level = PriorityParams::DEFAULT_LEVEL;
        Self {
            title: title.into(),
            description: String::new(),
            category_id,
            priority: (level, level, level),
            tags: Vec::new(),
            deadline,
            duration_minutes: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the urgency, importance and impact levels.
    #[must_use]
    pub const fn with_priority(mut self, urgency: i64, importance: i64, impact: i64) -> Self {
        self.priority = (urgency, importance, impact);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the estimated duration.
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }
}

/// Result of promoting a task to the daily board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// The task moved from the pool to the morning lane.
    Promoted(Task),
    /// The task was already on the daily board; nothing was written.
    AlreadyOnDailyBoard(Task),
}

impl PromotionOutcome {
    /// Returns the task in its current state.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::Promoted(task) | Self::AlreadyOnDailyBoard(task) => task,
        }
    }
}

/// Result of clearing the daily board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyBoardReset {
    /// Tasks returned to the pool.
    pub returned_to_pool: usize,
}

/// Result of the daily rollover check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverOutcome {
    /// The board was cleared and the marker advanced to `date`.
    Ran {
        /// Local date recorded as the last reset.
        date: NaiveDate,
        /// Tasks returned to the pool.
        returned_to_pool: usize,
    },
    /// The reset already ran on `date` or later.
    AlreadyRanToday {
        /// Current local date.
        date: NaiveDate,
    },
}

/// Service-level errors for task engine operations.
#[derive(Debug, Clone, Error)]
pub enum TaskEngineError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The lane classifier failed; the task is unchanged.
    #[error("classification failed for task {task_id}: {source}")]
    ClassificationFailed {
        /// Task that was to be classified.
        task_id: TaskId,
        /// Classifier failure.
        source: ClassifierError,
    },

    /// Loading or persisting failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl TaskEngineError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::NotFound(_) => FailureKind::NotFound,
            Self::ClassificationFailed { .. } => FailureKind::ClassificationFailed,
            Self::Sync(err) => err.kind(),
        }
    }
}

/// Result type for task engine operations.
pub type TaskEngineResult<T> = Result<T, TaskEngineError>;

/// Task engine orchestration service.
///
/// Every returned task is the state confirmed by the store.
#[derive(Debug)]
pub struct TaskEngine<S, K, C>
where
    C: Clock + Send + Sync,
{
    sync: SyncAdapter<S>,
    classifier: Arc<K>,
    clock: Arc<C>,
}

impl<S, K, C> Clone for TaskEngine<S, K, C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            sync: self.sync.clone(),
            classifier: Arc::clone(&self.classifier),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, K, C> TaskEngine<S, K, C>
where
    S: DocumentStore + 'static,
    K: LaneClassifier,
    C: Clock + Send + Sync,
{
    /// Creates a task engine.
    #[must_use]
    pub const fn new(sync: SyncAdapter<S>, classifier: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            sync,
            classifier,
            clock,
        }
    }

    /// Creates a pool task in the morning lane.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::PriorityOutOfRange`] or attachment errors before
    /// any I/O, [`TaskDomainError::UnknownCategory`] when the category is
    /// missing from the settings, or a sync failure. Nothing is persisted on
    /// error.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskEngineResult<Task> {
        let (urgency, importance, impact) = request.priority;
        let priority = PriorityParams::new(urgency, importance, impact)?;
        let draft = TaskDraft {
            title: request.title,
            description: request.description,
            category_id: request.category_id,
            priority,
            tags: request.tags,
            deadline: request.deadline,
            duration_minutes: request.duration_minutes,
            attachments: request.attachments,
        };
        let task = Task::create(draft, &*self.clock)?;
        self.ensure_category(task.category_id()).await?;

        self.sync
            .apply_mutation(Mutation::create_task(&task)?)
            .await?;
        info!(task_id = %task.id(), category_id = %task.category_id(), "task created");
        Ok(task)
    }

    /// Applies a field-level update.
    ///
    /// Only changed fields are written. Completing stamps `completedAt` in
    /// the same write; reverting clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::NotFound`], validation errors, or a sync
    /// failure.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskEngineResult<Task> {
        let mut task = self.load(id).await?;
        if let Some(category_id) = patch.category_id() {
            self.ensure_category(category_id).await?;
        }
        let before = task.clone();
        task.apply_patch(patch, &*self.clock)?;
        self.persist(&before, &task).await?;
        debug!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Moves a daily-board task to another lane.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::NotFound`],
    /// [`TaskDomainError::NotOnDailyBoard`] for pool tasks, or a sync
    /// failure.
    pub async fn move_lane(&self, id: TaskId, lane: Lane) -> TaskEngineResult<Task> {
        let mut task = self.load(id).await?;
        let before = task.clone();
        task.move_to_lane(lane)?;
        self.persist(&before, &task).await?;
        debug!(task_id = %id, lane = %lane, "task moved");
        Ok(task)
    }

    /// Marks a task completed.
    ///
    /// # Errors
    ///
    /// As [`TaskEngine::update`].
    pub async fn complete_task(&self, id: TaskId) -> TaskEngineResult<Task> {
        self.update(id, TaskPatch::new().with_status(TaskStatus::Completed))
            .await
    }

    /// Returns a completed task to todo.
    ///
    /// # Errors
    ///
    /// As [`TaskEngine::update`].
    pub async fn revert_task(&self, id: TaskId) -> TaskEngineResult<Task> {
        self.update(id, TaskPatch::new().with_status(TaskStatus::Todo))
            .await
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::NotFound`] or a sync failure.
    pub async fn delete_task(&self, id: TaskId) -> TaskEngineResult<()> {
        self.load(id).await?;
        self.sync.apply_mutation(Mutation::delete_task(id)).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Puts a task on the daily board in the morning lane.
    ///
    /// Promoting a task that is already on the board writes nothing and
    /// reports [`PromotionOutcome::AlreadyOnDailyBoard`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::NotFound`] or a sync failure.
    pub async fn promote_to_daily(&self, id: TaskId) -> TaskEngineResult<PromotionOutcome> {
        let mut task = self.load(id).await?;
        let before = task.clone();
        if !task.promote_to_daily() {
            info!(task_id = %id, "task already on the daily board");
            return Ok(PromotionOutcome::AlreadyOnDailyBoard(task));
        }
        self.persist(&before, &task).await?;
        info!(task_id = %id, "task promoted to the daily board");
        Ok(PromotionOutcome::Promoted(task))
    }

    /// Returns every daily-board task to the pool in one atomic batch.
    ///
    /// Todo tasks go back to the morning lane; completed tasks keep their
    /// lane. Clearing an empty board writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BatchTooLarge`] or a sync failure; the board is
    /// unchanged on error.
    pub async fn clear_daily_board(&self) -> TaskEngineResult<DailyBoardReset> {
        let mutations = self.daily_board_reset().await?;
        let returned_to_pool = mutations.len();
        self.sync.apply_batch(mutations).await?;
        info!(returned_to_pool, "daily board cleared");
        Ok(DailyBoardReset { returned_to_pool })
    }

    /// Asks the classifier for a lane and assigns it.
    ///
    /// The classifier sees the trimmed description, or the title when the
    /// description is blank.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::ClassificationFailed`] when the classifier
    /// fails, leaving the task unchanged, [`TaskEngineError::NotFound`], or a
    /// sync failure.
    pub async fn categorize_via_classifier(&self, id: TaskId) -> TaskEngineResult<Task> {
        let mut task = self.load(id).await?;
        let description = task.description().trim();
        let text = if description.is_empty() {
            task.title().to_owned()
        } else {
            description.to_owned()
        };

        let lane = match self.classifier.classify(&text).await {
            Ok(lane) => lane,
            Err(source) => {
                warn!(task_id = %id, error = %source, "lane classification failed");
                return Err(TaskEngineError::ClassificationFailed {
                    task_id: id,
                    source,
                });
            }
        };

        let before = task.clone();
        task.assign_lane(lane);
        self.persist(&before, &task).await?;
        debug!(task_id = %id, lane = %lane, "task classified");
        Ok(task)
    }

    /// Clears the daily board once per local calendar day.
    ///
    /// The reset and the new marker are written in the same batch, so a
    /// failed write leaves both untouched and the next session retries.
    ///
    /// # Concurrency
    ///
    /// The marker is read and then written without a conditional write, so
    /// "once per day" holds for sequential runs only. Two sessions of the
    /// same user running the rollover at the same moment may both reset the
    /// board, and the later reset also clears any promotion made between
    /// the two.
    ///
    /// # Errors
    ///
    /// Returns a sync failure.
    pub async fn run_daily_rollover(&self) -> TaskEngineResult<RolloverOutcome> {
        let today = local_date(self.clock.utc(), self.sync.config().local_offset());
        let last_reset = self.sync.load_reset_marker().await?;
        if !should_run_daily_reset(last_reset, today) {
            debug!(%today, "daily rollover already ran");
            return Ok(RolloverOutcome::AlreadyRanToday { date: today });
        }

        let mut mutations = self.daily_board_reset().await?;
        let returned_to_pool = mutations.len();
        mutations.push(Mutation::record_reset(today));
        self.sync.apply_batch(mutations).await?;
        info!(%today, returned_to_pool, "daily rollover ran");
        Ok(RolloverOutcome::Ran {
            date: today,
            returned_to_pool,
        })
    }

    /// Returns every task.
    ///
    /// # Errors
    ///
    /// Returns a sync failure.
    pub async fn list_tasks(&self) -> TaskEngineResult<Vec<Task>> {
        Ok(self.sync.load_tasks().await?)
    }

    /// Returns one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEngineError::NotFound`] or a sync failure.
    pub async fn task(&self, id: TaskId) -> TaskEngineResult<Task> {
        self.load(id).await
    }

    async fn load(&self, id: TaskId) -> TaskEngineResult<Task> {
        self.sync
            .find_task(id)
            .await?
            .ok_or(TaskEngineError::NotFound(id))
    }

    async fn ensure_category(&self, category_id: &CategoryId) -> TaskEngineResult<()> {
        let settings = self.sync.load_settings().await?;
        if settings.has_category(category_id) {
            Ok(())
        } else {
            Err(TaskDomainError::UnknownCategory(category_id.clone()).into())
        }
    }

    async fn persist(&self, before: &Task, after: &Task) -> TaskEngineResult<()> {
        if let Some(mutation) = Mutation::update_task(before, after)? {
            self.sync.apply_mutation(mutation).await?;
        }
        Ok(())
    }

    async fn daily_board_reset(&self) -> TaskEngineResult<Vec<Mutation>> {
        let tasks = self.sync.load_tasks().await?;
        let mut mutations = Vec::new();
        for mut task in tasks.into_iter().filter(Task::is_daily) {
            let before = task.clone();
            task.return_to_pool();
            if let Some(mutation) = Mutation::update_task(&before, &task)? {
                mutations.push(mutation);
            }
        }
        Ok(mutations)
    }
}
