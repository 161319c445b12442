//! Unit tests for the settings module.

mod service_tests;
