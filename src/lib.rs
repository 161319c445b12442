//! Tassko: personal task planning core.
//!
//! This crate provides the task domain model behind a daily planning tool:
//! a pool of tasks, a daily board split into three time-of-day lanes,
//! weighted priority ranking and read-only completion analytics.
//!
//! # Architecture
//!
//! Tassko follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store,
//!   keyword classifier)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, lane movement and the daily board
//! - [`settings`]: Categories, scoring weights, lane windows and objectives
//! - [`ranking`]: Priority scoring and ranked board views
//! - [`sync`]: Backing-store port, change notification and import/export
//! - [`analytics`]: Completion aggregates derived on demand
//! - [`session`]: Per-user composition root

pub mod analytics;
pub mod config;
pub mod error;
pub mod ranking;
pub mod session;
pub mod settings;
pub mod sync;
pub mod task;

#[cfg(test)]
mod test_support;
