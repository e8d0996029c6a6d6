//! Shared types for the campaign audience engine
//!
//! Common types used across crates: domain models, the backend response
//! envelope, and request/response DTOs for the campaign API.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{AddGroupMembersRequest, CustomerListResponse, CustomerQuery, FilterMode, ImportResult};
pub use models::{Customer, CustomerId, Group, GroupId, ValidationStatus};
pub use response::ApiResponse;
