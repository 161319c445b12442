//! Port contracts for the backing document store.

mod store;

pub use store::{DocumentStore, DocumentStoreError, DocumentStoreResult};
