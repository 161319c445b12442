//! Per-user composition root.
//!
//! A [`PlannerSession`] is built once per signed-in user and handed to every
//! consumer. Opening it runs the daily rollover exactly once; nothing runs
//! on a timer afterwards.

use crate::config::PlannerConfig;
use crate::settings::{domain::Settings, services::SettingsService};
use crate::sync::{
    ports::DocumentStore,
    services::{Subscription, SyncAdapter, SyncResult},
};
use crate::task::{
    domain::{Task, UserId},
    ports::LaneClassifier,
    services::{RolloverOutcome, TaskEngine, TaskEngineResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Services of one user wired over one store.
#[derive(Debug)]
pub struct PlannerSession<S, K, C>
where
    C: Clock + Send + Sync,
{
    tasks: TaskEngine<S, K, C>,
    settings: SettingsService<S>,
    sync: SyncAdapter<S>,
    last_rollover: RolloverOutcome,
}

impl<S, K, C> PlannerSession<S, K, C>
where
    S: DocumentStore + 'static,
    K: LaneClassifier,
    C: Clock + Send + Sync,
{
    /// Opens a session for `owner` and runs the daily rollover if it is due.
    ///
    /// Opens of the same user are expected to be sequential; see
    /// [`TaskEngine::run_daily_rollover`] for what concurrent opens on a new
    /// day may do.
    ///
    /// # Errors
    ///
    /// Returns the rollover failure; no session is created and the next
    /// open retries the rollover.
    pub async fn open(
        owner: UserId,
        store: Arc<S>,
        classifier: Arc<K>,
        clock: Arc<C>,
        config: PlannerConfig,
    ) -> TaskEngineResult<Self> {
        let sync = SyncAdapter::new(store, owner, config);
        let tasks = TaskEngine::new(sync.clone(), classifier, clock);
        let settings = SettingsService::new(sync.clone());
        let last_rollover = tasks.run_daily_rollover().await?;
        info!(owner = %sync.owner(), "planner session opened");
        Ok(Self {
            tasks,
            settings,
            sync,
            last_rollover,
        })
    }

    /// Returns the task engine.
    #[must_use]
    pub const fn tasks(&self) -> &TaskEngine<S, K, C> {
        &self.tasks
    }

    /// Returns the settings service.
    #[must_use]
    pub const fn settings(&self) -> &SettingsService<S> {
        &self.settings
    }

    /// Returns the sync adapter for loading, import and export.
    #[must_use]
    pub const fn sync(&self) -> &SyncAdapter<S> {
        &self.sync
    }

    /// Returns what the rollover did when the session opened.
    #[must_use]
    pub const fn last_rollover(&self) -> RolloverOutcome {
        self.last_rollover
    }

    /// Subscribes to task and settings changes of this user, including
    /// changes written by other sessions.
    ///
    /// # Errors
    ///
    /// As [`SyncAdapter::subscribe`].
    pub async fn subscribe<F, G>(&self, on_tasks: F, on_settings: G) -> SyncResult<Subscription>
    where
        F: Fn(Vec<Task>) + Send + Sync + 'static,
        G: Fn(Settings) + Send + Sync + 'static,
    {
        self.sync.subscribe(on_tasks, on_settings).await
    }
}
