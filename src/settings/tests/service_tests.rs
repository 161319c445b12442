//! Service orchestration tests for settings maintenance.

use std::sync::Arc;

use crate::error::FailureKind;
use crate::settings::{
    domain::{CategoryPatch, SettingsDomainError, WeightFactor, WeightsPatch},
    services::{SettingsService, SettingsServiceError},
};
use crate::sync::adapters::memory::InMemoryDocumentStore;
use crate::sync::domain::{CollectionKind, CollectionRef, SETTINGS_DOCUMENT_ID};
use crate::sync::ports::DocumentStore;
use crate::task::{
    adapters::memory::ScriptedLaneClassifier,
    domain::Lane,
    services::{CreateTaskRequest, TaskEngine},
};
use crate::test_support::{ManualClock, at, owner, sync_over, work};
use rstest::{fixture, rstest};

struct Harness {
    store: Arc<InMemoryDocumentStore>,
    service: SettingsService<InMemoryDocumentStore>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = SettingsService::new(sync_over(&store));
    Harness { store, service }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_settings_load_as_defaults_without_writing(harness: Harness) {
    let settings = harness.service.settings().await.expect("load settings");

    assert_eq!(settings.categories().len(), 4);
    let stored = harness
        .store
        .get(
            &CollectionRef::new(owner(), CollectionKind::Settings),
            SETTINGS_DOCUMENT_ID,
        )
        .await
        .expect("read should succeed");
    assert!(stored.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn added_category_is_persisted(harness: Harness) {
    let added = harness
        .service
        .add_category("Errands", "#AABBCC")
        .await
        .expect("add category");

    let settings = harness.service.settings().await.expect("load settings");
    let stored = settings.category(added.id()).expect("category persisted");
    assert_eq!(stored.color().as_str(), "#aabbcc");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn category_update_is_persisted(harness: Harness) {
    harness
        .service
        .update_category(&work(), CategoryPatch::new().with_name("Job"))
        .await
        .expect("update category");

    let settings = harness.service.settings().await.expect("load settings");
    assert_eq!(
        settings.category(&work()).map(|c| c.name().as_str().to_owned()),
        Some("Job".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn referenced_category_cannot_be_deleted(harness: Harness) {
    let engine = TaskEngine::new(
        sync_over(&harness.store),
        Arc::new(ScriptedLaneClassifier::new()),
        Arc::new(ManualClock::new(at("2025-03-10T09:00:00Z"))),
    );
    let task = engine
        .create(CreateTaskRequest::new(
            "Report",
            work(),
            at("2025-03-12T09:00:00Z"),
        ))
        .await
        .expect("create task");
    let before = harness.service.settings().await.expect("load settings");

    let result = harness.service.delete_category(&work()).await;

    let err = result.expect_err("category is in use");
    assert_eq!(err.kind(), FailureKind::ConstraintViolation);
    assert!(matches!(
        err,
        SettingsServiceError::Domain(SettingsDomainError::CategoryInUse { task_count: 1, .. })
    ));
    assert_eq!(
        harness.service.settings().await.expect("load settings"),
        before
    );
    assert_eq!(engine.task(task.id()).await.expect("task kept"), task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreferenced_category_is_deleted(harness: Harness) {
    let removed = harness
        .service
        .delete_category(&work())
        .await
        .expect("delete category");

    assert_eq!(removed.id(), &work());
    let settings = harness.service.settings().await.expect("load settings");
    assert!(!settings.has_category(&work()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weights_windows_objectives_and_sound_are_persisted(harness: Harness) {
    let service = &harness.service;
    service
        .update_weights(&WeightsPatch::new().with(WeightFactor::Deadline, 3.0))
        .await
        .expect("weights");
    service
        .update_swimlane_times(Lane::Morning, 5, 11)
        .await
        .expect("window");
    service
        .update_daily_objectives(7, 6.5)
        .await
        .expect("objectives");
    service.set_sound_enabled(false).await.expect("sound");

    let settings = service.settings().await.expect("load settings");
    assert_eq!(settings.priority_weights().deadline, 3.0);
    assert_eq!(settings.priority_weights().urgency, 1.0);
    assert_eq!(settings.swimlane_times().window(Lane::Morning).start(), 5);
    assert_eq!(settings.daily_objectives().tasks(), 7);
    assert!(!settings.sound_enabled());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_window_is_rejected_without_writing(harness: Harness) {
    let result = harness
        .service
        .update_swimlane_times(Lane::Midday, 18, 12)
        .await;

    assert_eq!(
        result.expect_err("invalid window").kind(),
        FailureKind::ConstraintViolation
    );
    let stored = harness
        .store
        .get(
            &CollectionRef::new(owner(), CollectionKind::Settings),
            SETTINGS_DOCUMENT_ID,
        )
        .await
        .expect("read should succeed");
    assert!(stored.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_outage_is_a_sync_failure(harness: Harness) {
    harness.store.set_offline(true);

    let result = harness.service.add_category("Errands", "#123456").await;

    assert_eq!(
        result.expect_err("offline").kind(),
        FailureKind::SyncFailure
    );
}
