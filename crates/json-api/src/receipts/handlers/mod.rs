//! Receipt Handlers

pub(crate) mod get;
