//! Task pool, daily board and lane classification.
//!
//! Tasks are created in a general pool, promoted onto a daily board split
//! into morning, midday and evening lanes, completed, and returned to the
//! pool by the once-per-day reset. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
