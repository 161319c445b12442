//! Unit tests for the sync context.
