//! Shared fixtures for unit tests.

use crate::config::PlannerConfig;
use crate::settings::domain::CategoryId;
use crate::sync::{adapters::memory::InMemoryDocumentStore, services::SyncAdapter};
use crate::task::domain::{PriorityParams, Task, TaskDraft, UserId};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Clock whose time only moves when a test moves it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Parses an RFC 3339 timestamp.
pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Owner of every document written by the test helpers.
pub fn owner() -> UserId {
    UserId::new("user-1")
}

/// Identifier of the default "Work" category.
pub fn work() -> CategoryId {
    CategoryId::new("work").expect("valid category id")
}

/// Identifier of the default "Personal" category.
pub fn personal() -> CategoryId {
    CategoryId::new("personal").expect("valid category id")
}

/// Sync adapter for [`owner`] over `store` with the default configuration.
pub fn sync_over(store: &Arc<InMemoryDocumentStore>) -> SyncAdapter<InMemoryDocumentStore> {
    SyncAdapter::new(Arc::clone(store), owner(), PlannerConfig::default())
}

/// Builds a pool task in the "Work" category created at `created`.
pub fn task_with(
    title: &str,
    (urgency, importance, impact): (i64, i64, i64),
    created: DateTime<Utc>,
    deadline: DateTime<Utc>,
) -> Task {
    let draft = TaskDraft {
        title: title.to_owned(),
        description: String::new(),
        category_id: work(),
        priority: PriorityParams::new(urgency, importance, impact).expect("valid priority"),
        tags: Vec::new(),
        deadline,
        duration_minutes: None,
        attachments: Vec::new(),
    };
    Task::create(draft, &ManualClock::new(created)).expect("valid task")
}
