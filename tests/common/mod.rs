//! Common test utilities for trusty-client integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;
