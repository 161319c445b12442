//! In-memory adapters for the sync context.

mod store;

pub use store::InMemoryDocumentStore;
