//! Orchestration between the task and settings services and the store.

mod adapter;
mod error;
mod mutation;
mod subscription;

pub use adapter::SyncAdapter;
pub use error::{SyncError, SyncResult};
pub use mutation::Mutation;
pub use subscription::Subscription;
