//! Monitoring-API access: token exchange, sensor catalogs, daily summaries.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod summary;

pub use client::HyperviewClient;
pub use error::HyperviewError;
