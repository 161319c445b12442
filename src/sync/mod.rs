//! Synchronisation between planner state and the backing document store.
//!
//! The sync context owns the document store port, an in-memory store used
//! by tests and local sessions, and the [`services::SyncAdapter`] that every
//! other service persists through. Writes are confirmed: a service returns
//! a value only after the store accepted the write that produced it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
