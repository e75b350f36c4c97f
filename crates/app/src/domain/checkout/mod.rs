//! Checkout

pub mod data;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
