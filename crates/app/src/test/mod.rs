//! Shared infrastructure for database-backed service tests.

mod context;

pub(crate) use context::TestContext;
