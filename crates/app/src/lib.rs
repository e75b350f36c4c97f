//! Shared storefront domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod pricing;

#[cfg(test)]
mod test;
