//! Per-user settings: categories, scoring weights, lane windows and daily
//! objectives.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]
//!
//! Settings persist through the sync context; there is no settings-specific
//! port.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
