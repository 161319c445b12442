//! Adapter implementations for task engine ports.

pub mod memory;
