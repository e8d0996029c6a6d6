//! Data models
//!
//! Shared between the campaign backend API and the client engine.
//! All IDs are `uuid::Uuid` as served by the backend.

pub mod customer;
pub mod group;

// Re-exports
pub use customer::*;
pub use group::*;
