//! Test support for service-level tests.


pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
