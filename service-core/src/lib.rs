//! service-core: Shared HTTP infrastructure for the quiz backend.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
