//! Sync adapter: decoded reads, bounded batches, change listeners and
//! replace-all import.

use super::{Mutation, Subscription, SyncError, SyncResult};
use crate::config::PlannerConfig;
use crate::settings::domain::Settings;
use crate::sync::domain::{
    ChangeEvent, CollectionKind, CollectionRef, Document, ImportReport, RESET_MARKER_DOCUMENT_ID,
    SETTINGS_DOCUMENT_ID, Snapshot, WriteOp,
};
use crate::sync::ports::DocumentStore;
use crate::task::domain::{Task, TaskId, UserId};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetMarker {
    last_reset_date: NaiveDate,
}

/// Reconciles one user's tasks and settings with the backing store.
///
/// The adapter holds no cached state: every read goes to the store and
/// every returned value has been decoded through the validating record
/// conversions.
#[derive(Debug)]
pub struct SyncAdapter<S> {
    store: Arc<S>,
    owner: UserId,
    config: PlannerConfig,
}

impl<S> Clone for SyncAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            owner: self.owner.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> SyncAdapter<S>
where
    S: DocumentStore + 'static,
{
    /// Creates an adapter over the collections of `owner`.
    #[must_use]
    pub const fn new(store: Arc<S>, owner: UserId, config: PlannerConfig) -> Self {
        Self {
            store,
            owner,
            config,
        }
    }

    /// Returns the user whose collections this adapter reads and writes.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the planner configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn collection(&self, kind: CollectionKind) -> CollectionRef {
        CollectionRef::new(self.owner.clone(), kind)
    }

    fn batch_limit(&self) -> usize {
        self.config
            .max_batch_writes()
            .min(self.store.max_batch_size())
    }

    /// Loads every task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedDocument`] when a stored task violates
    /// an invariant, or a store error.
    pub async fn load_tasks(&self) -> SyncResult<Vec<Task>> {
        let documents = self.store.list(&self.collection(CollectionKind::Tasks)).await?;
        documents.into_iter().map(decode_task).collect()
    }

    /// Loads every decodable task, skipping malformed documents with a
    /// warning.
    async fn load_tasks_lenient(&self) -> SyncResult<Vec<Task>> {
        let documents = self.store.list(&self.collection(CollectionKind::Tasks)).await?;
        Ok(documents
            .into_iter()
            .filter_map(|document| {
                decode_task(document)
                    .inspect_err(|err| warn!(error = %err, "skipping undecodable task document"))
                    .ok()
            })
            .collect())
    }

    /// Loads one task.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedDocument`] or a store error.
    pub async fn find_task(&self, id: TaskId) -> SyncResult<Option<Task>> {
        let key = id.to_string();
        let stored = self
            .store
            .get(&self.collection(CollectionKind::Tasks), &key)
            .await?;
        stored
            .map(|fields| decode_task(Document { id: key, fields }))
            .transpose()
    }

    /// Loads the settings, falling back to defaults when none are stored.
    ///
    /// The defaults are not written back.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedDocument`] or a store error.
    pub async fn load_settings(&self) -> SyncResult<Settings> {
        let stored = self
            .store
            .get(&self.collection(CollectionKind::Settings), SETTINGS_DOCUMENT_ID)
            .await?;
        let Some(fields) = stored else {
            return Ok(Settings::default());
        };
        serde_json::from_value(Value::Object(fields)).map_err(|err| {
            SyncError::MalformedDocument {
                collection: CollectionKind::Settings,
                id: SETTINGS_DOCUMENT_ID.to_owned(),
                reason: err.to_string(),
            }
        })
    }

    /// Loads every task together with the settings.
    ///
    /// # Errors
    ///
    /// Returns the first load failure.
    pub async fn load_all(&self) -> SyncResult<Snapshot> {
        let tasks = self.load_tasks().await?;
        let settings = self.load_settings().await?;
        Ok(Snapshot { tasks, settings })
    }

    /// Loads the local date of the last daily reset, if one ever ran.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MalformedDocument`] or a store error.
    pub async fn load_reset_marker(&self) -> SyncResult<Option<NaiveDate>> {
        let stored = self
            .store
            .get(&self.collection(CollectionKind::Meta), RESET_MARKER_DOCUMENT_ID)
            .await?;
        stored
            .map(|fields| {
                serde_json::from_value::<ResetMarker>(Value::Object(fields))
                    .map(|marker| marker.last_reset_date)
                    .map_err(|err| SyncError::MalformedDocument {
                        collection: CollectionKind::Meta,
                        id: RESET_MARKER_DOCUMENT_ID.to_owned(),
                        reason: err.to_string(),
                    })
            })
            .transpose()
    }

    /// Persists a single mutation.
    ///
    /// # Errors
    ///
    /// Returns a store error; the mutation is then considered not applied.
    pub async fn apply_mutation(&self, mutation: Mutation) -> SyncResult<()> {
        match mutation.into_write_op(&self.owner) {
            WriteOp::Put {
                collection,
                id,
                fields,
            } => self.store.put(&collection, &id, fields).await?,
            WriteOp::Merge {
                collection,
                id,
                fields,
            } => self.store.merge(&collection, &id, fields).await?,
            WriteOp::Delete { collection, id } => self.store.delete(&collection, &id).await?,
        }
        Ok(())
    }

    /// Persists mutations as one atomic batch. An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BatchTooLarge`] before any write when the batch
    /// exceeds the configured or store limit, or a store error.
    pub async fn apply_batch(&self, mutations: Vec<Mutation>) -> SyncResult<()> {
        if mutations.is_empty() {
            return Ok(());
        }
        let limit = self.batch_limit();
        if mutations.len() > limit {
            return Err(SyncError::BatchTooLarge {
                operations: mutations.len(),
                limit,
            });
        }
        let ops = mutations
            .into_iter()
            .map(|mutation| mutation.into_write_op(&self.owner))
            .collect();
        self.store.batch(ops).await?;
        Ok(())
    }

    /// Pushes the current tasks and settings to the callbacks whenever the
    /// store reports a change, including changes made by other sessions of
    /// the same user.
    ///
    /// Malformed task documents are skipped with a warning. Listeners stop
    /// when the returned [`Subscription`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Runtime`] outside a Tokio runtime, or a store
    /// error when subscribing fails.
    pub async fn subscribe<F, G>(&self, on_tasks: F, on_settings: G) -> SyncResult<Subscription>
    where
        F: Fn(Vec<Task>) + Send + Sync + 'static,
        G: Fn(Settings) + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|err| SyncError::Runtime(err.to_string()))?;
        let task_changes = self
            .store
            .on_change(&self.collection(CollectionKind::Tasks))
            .await?;
        let settings_changes = self
            .store
            .on_change(&self.collection(CollectionKind::Settings))
            .await?;

        let tasks_adapter = self.clone();
        let tasks_listener = handle.spawn(listen(
            task_changes,
            move || {
                let adapter = tasks_adapter.clone();
                async move { adapter.load_tasks_lenient().await }
            },
            on_tasks,
        ));
        let settings_adapter = self.clone();
        let settings_listener = handle.spawn(listen(
            settings_changes,
            move || {
                let adapter = settings_adapter.clone();
                async move { adapter.load_settings().await }
            },
            on_settings,
        ));

        debug!(owner = %self.owner, "subscribed to task and settings changes");
        Ok(Subscription::new(vec![tasks_listener, settings_listener]))
    }

    /// Replaces every task and the settings in one atomic batch.
    ///
    /// Imported tasks receive fresh identifiers. Nothing is written when the
    /// snapshot is inconsistent or the batch would exceed the write limit.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidFormat`] when a task references a
    /// category missing from the imported settings,
    /// [`SyncError::BatchTooLarge`], or a store error.
    pub async fn import_all(&self, snapshot: Snapshot) -> SyncResult<ImportReport> {
        let Snapshot { tasks, settings } = snapshot;
        if let Some(task) = tasks
            .iter()
            .find(|task| !settings.has_category(task.category_id()))
        {
            return Err(SyncError::InvalidFormat(format!(
                "task {} references unknown category {}",
                task.title(),
                task.category_id()
            )));
        }

        let tasks_collection = self.collection(CollectionKind::Tasks);
        let existing = self.store.list(&tasks_collection).await?;
        let removed = existing.len();
        let imported = tasks.len();

        let mut ops: Vec<WriteOp> = existing
            .into_iter()
            .map(|document| WriteOp::Delete {
                collection: tasks_collection.clone(),
                id: document.id,
            })
            .collect();
        for task in tasks {
            ops.push(Mutation::create_task(&task.reissued())?.into_write_op(&self.owner));
        }
        ops.push(Mutation::replace_settings(&settings)?.into_write_op(&self.owner));

        let limit = self.batch_limit();
        if ops.len() > limit {
            return Err(SyncError::BatchTooLarge {
                operations: ops.len(),
                limit,
            });
        }
        self.store.batch(ops).await?;

        info!(owner = %self.owner, removed, imported, "import applied");
        Ok(ImportReport { removed, imported })
    }

    /// Parses an exported document and imports it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidFormat`] when the payload is not JSON,
    /// lacks the `tasks` or `settings` key, or holds an invalid task or
    /// settings value; otherwise as [`SyncAdapter::import_all`].
    pub async fn import_json(&self, payload: &str) -> SyncResult<ImportReport> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|err| SyncError::InvalidFormat(err.to_string()))?;
        for key in ["tasks", "settings"] {
            if value.get(key).is_none() {
                return Err(SyncError::InvalidFormat(format!("missing `{key}` key")));
            }
        }
        let snapshot: Snapshot = serde_json::from_value(value)
            .map_err(|err| SyncError::InvalidFormat(err.to_string()))?;
        self.import_all(snapshot).await
    }

    /// Serializes the current tasks and settings as a pretty-printed JSON
    /// backup document.
    ///
    /// # Errors
    ///
    /// Returns a load failure or [`SyncError::Encode`].
    pub async fn export_all(&self) -> SyncResult<String> {
        let snapshot = self.load_all().await?;
        serde_json::to_string_pretty(&snapshot).map_err(|err| SyncError::Encode(err.to_string()))
    }
}

/// Decodes a stored task. The document key is the task identifier: a missing
/// embedded `id` takes the key, a different one is rejected.
fn decode_task(document: Document) -> SyncResult<Task> {
    let Document { id: key, mut fields } = document;
    fields
        .entry("id")
        .or_insert_with(|| Value::String(key.clone()));
    let malformed = |reason: String| SyncError::MalformedDocument {
        collection: CollectionKind::Tasks,
        id: key.clone(),
        reason,
    };
    let task: Task =
        serde_json::from_value(Value::Object(fields)).map_err(|err| malformed(err.to_string()))?;
    if task.id().to_string() != key {
        return Err(malformed(format!(
            "embedded id {} does not match the document key",
            task.id()
        )));
    }
    Ok(task)
}

async fn listen<T, L, Fut, D>(
    mut changes: broadcast::Receiver<ChangeEvent>,
    load: L,
    deliver: D,
) where
    L: Fn() -> Fut,
    Fut: Future<Output = SyncResult<T>>,
    D: Fn(T),
{
    loop {
        match changes.recv().await {
            Ok(_) | Err(RecvError::Lagged(_)) => {
                if let Err(err) = load().await.map(&deliver) {
                    warn!(error = %err, "failed to reload after change");
                }
            }
            Err(RecvError::Closed) => break,
        }
    }
}

