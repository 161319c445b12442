//! Shared clock and session helpers for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use tassko::{
    config::PlannerConfig,
    session::PlannerSession,
    settings::domain::CategoryId,
    sync::adapters::memory::InMemoryDocumentStore,
    task::{adapters::memory::KeywordLaneClassifier, domain::UserId, services::TaskEngineResult},
};

/// Session type used by the integration tests.
pub type TestSession = PlannerSession<InMemoryDocumentStore, KeywordLaneClassifier, ManualClock>;

/// Clock that only moves when a test moves it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error when `timestamp` is not valid RFC 3339.
pub fn at(timestamp: &str) -> Result<DateTime<Utc>, eyre::Report> {
    Ok(DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc))
}

/// Identifier of the default "Work" category.
///
/// # Errors
///
/// Never fails for the built-in identifier; the result keeps call sites
/// free of `expect`.
pub fn work() -> Result<CategoryId, eyre::Report> {
    Ok(CategoryId::new("work")?)
}

/// Opens a session for `user-1` over `store`.
///
/// # Errors
///
/// Returns the rollover failure of opening the session.
pub async fn open_session(
    store: &Arc<InMemoryDocumentStore>,
    clock: &Arc<ManualClock>,
) -> TaskEngineResult<TestSession> {
    PlannerSession::open(
        UserId::new("user-1"),
        Arc::clone(store),
        Arc::new(KeywordLaneClassifier::new()),
        Arc::clone(clock),
        PlannerConfig::default(),
    )
    .await
}
