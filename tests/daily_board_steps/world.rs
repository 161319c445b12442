//! Shared world state for daily board BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, TestSession, open_session};
use rstest::fixture;
use tassko::{
    sync::adapters::memory::InMemoryDocumentStore,
    task::{
        domain::Task,
        services::{PromotionOutcome, TaskEngineError},
    },
};

/// Scenario world for daily board behaviour tests.
pub struct DailyBoardWorld {
    pub store: Arc<InMemoryDocumentStore>,
    pub clock: Option<Arc<ManualClock>>,
    pub session: Option<TestSession>,
    pub task: Option<Task>,
    pub last_promotion: Option<PromotionOutcome>,
    pub last_move: Option<Result<Task, TaskEngineError>>,
}

impl DailyBoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryDocumentStore::new()),
            clock: None,
            session: None,
            task: None,
            last_promotion: None,
            last_move: None,
        }
    }

    /// Returns the open session.
    ///
    /// # Errors
    ///
    /// Returns an error when no planner was opened yet.
    pub fn session(&self) -> Result<&TestSession, eyre::Report> {
        self.session
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no planner opened in scenario world"))
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no task created in scenario world"))
    }

    /// Opens (or reopens) the planner at the world's clock.
    ///
    /// # Errors
    ///
    /// Returns an error when no clock was set or the rollover fails.
    pub fn reopen(&mut self) -> Result<(), eyre::Report> {
        let clock = self
            .clock
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no clock in scenario world"))?;
        self.session = Some(run_async(open_session(&self.store, clock))?);
        Ok(())
    }
}

impl Default for DailyBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DailyBoardWorld {
    DailyBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
