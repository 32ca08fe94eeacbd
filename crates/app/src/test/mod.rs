//! Shared fixtures for integration tests.

mod helpers;

pub(crate) use context::TestContext;
