//! In-memory document store with push change notification.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::trace;

use crate::sync::{
    domain::{ChangeEvent, CollectionRef, Document, DocumentFields, WriteOp},
    ports::{DocumentStore, DocumentStoreError, DocumentStoreResult},
};

/// Capacity of each per-collection notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Default batch limit, matching common hosted document stores.
const DEFAULT_MAX_BATCH_SIZE: usize = 500;

type StoreState = HashMap<CollectionRef, BTreeMap<String, DocumentFields>>;

/// Thread-safe in-memory document store.
///
/// Clones share the same documents and subscribers, so two sessions opened
/// over clones of one store observe each other's writes.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    state: RwLock<StoreState>,
    channels: Mutex<HashMap<CollectionRef, broadcast::Sender<ChangeEvent>>>,
    offline: AtomicBool,
    max_batch_size: usize,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::with_max_batch_size(DEFAULT_MAX_BATCH_SIZE)
    }
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store accepting batches of at most `limit` writes.
    #[must_use]
    pub fn with_max_batch_size(limit: usize) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState::new()),
                channels: Mutex::new(HashMap::new()),
                offline: AtomicBool::new(false),
                max_batch_size: limit,
            }),
        }
    }

    /// Simulates losing or regaining the connection. While offline every
    /// call fails with [`DocumentStoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> DocumentStoreResult<()> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::unavailable(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "document store is offline",
            )));
        }
        Ok(())
    }

    fn notify(&self, events: BTreeMap<CollectionRef, Vec<String>>) {
        let channels = self
            .inner
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (collection, document_ids) in events {
            let Some(sender) = channels.get(&collection) else {
                continue;
            };
            let event = ChangeEvent {
                collection,
                document_ids,
            };
            if sender.send(event).is_err() {
                trace!("change dropped: no active subscribers");
            }
        }
    }
}

fn poisoned<T>(err: PoisonError<T>) -> DocumentStoreError {
    DocumentStoreError::unavailable(std::io::Error::other(err.to_string()))
}

fn apply(state: &mut StoreState, op: WriteOp) -> DocumentStoreResult<()> {
    match op {
        WriteOp::Put {
            collection,
            id,
            fields,
        } => {
            state.entry(collection).or_default().insert(id, fields);
        }
        WriteOp::Merge {
            collection,
            id,
            fields,
        } => {
            let Some(document) = state.get_mut(&collection).and_then(|docs| docs.get_mut(&id))
            else {
                return Err(DocumentStoreError::NotFound { collection, id });
            };
            for (key, value) in fields {
                if value.is_null() {
                    document.remove(&key);
                } else {
                    document.insert(key, value);
                }
            }
        }
        WriteOp::Delete { collection, id } => {
            if let Some(docs) = state.get_mut(&collection) {
                docs.remove(&id);
            }
        }
    }
    Ok(())
}

fn changed_documents(ops: &[WriteOp]) -> BTreeMap<CollectionRef, Vec<String>> {
    let mut events: BTreeMap<CollectionRef, Vec<String>> = BTreeMap::new();
    for op in ops {
        let ids = events.entry(op.collection().clone()).or_default();
        if !ids.iter().any(|id| id == op.document_id()) {
            ids.push(op.document_id().to_owned());
        }
    }
    events
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(
        &self,
        collection: &CollectionRef,
        id: &str,
    ) -> DocumentStoreResult<Option<DocumentFields>> {
        self.ensure_online()?;
        let state = self.inner.state.read().map_err(poisoned)?;
        Ok(state.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn list(&self, collection: &CollectionRef) -> DocumentStoreResult<Vec<Document>> {
        self.ensure_online()?;
        let state = self.inner.state.read().map_err(poisoned)?;
        Ok(state
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn put(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()> {
        self.batch(vec![WriteOp::Put {
            collection: collection.clone(),
            id: id.to_owned(),
            fields,
        }])
        .await
    }

    async fn merge(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()> {
        self.batch(vec![WriteOp::Merge {
            collection: collection.clone(),
            id: id.to_owned(),
            fields,
        }])
        .await
    }

    async fn delete(&self, collection: &CollectionRef, id: &str) -> DocumentStoreResult<()> {
        self.batch(vec![WriteOp::Delete {
            collection: collection.clone(),
            id: id.to_owned(),
        }])
        .await
    }

    async fn batch(&self, ops: Vec<WriteOp>) -> DocumentStoreResult<()> {
        self.ensure_online()?;
        if ops.len() > self.inner.max_batch_size {
            return Err(DocumentStoreError::BatchTooLarge {
                operations: ops.len(),
                limit: self.inner.max_batch_size,
            });
        }
        if ops.is_empty() {
            return Ok(());
        }

        let events = changed_documents(&ops);
        {
            let mut state = self.inner.state.write().map_err(poisoned)?;
            let mut staged = state.clone();
            for op in ops {
                apply(&mut staged, op)?;
            }
            *state = staged;
        }
        self.notify(events);
        Ok(())
    }

    async fn on_change(
        &self,
        collection: &CollectionRef,
    ) -> DocumentStoreResult<broadcast::Receiver<ChangeEvent>> {
        self.ensure_online()?;
        let mut channels = self.inner.channels.lock().map_err(poisoned)?;
        let sender = channels
            .entry(collection.clone())
            .or_insert_with(|| broadcast::channel(CHANGE_CHANNEL_CAPACITY).0);
        Ok(sender.subscribe())
    }

    fn max_batch_size(&self) -> usize {
        self.inner.max_batch_size
    }
}
