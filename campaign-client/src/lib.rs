//! Campaign Client - audience selection & membership reconciliation
//!
//! HTTP client for the campaign backend plus the session engine behind
//! the group-membership and campaign-targeting screens: incrementally
//! loaded candidate pages, debounced search, cross-page selection, and
//! optimistic membership mutations reconciled against the server.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::CampaignApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{
    AudienceSession, BulkAddPlan, BulkRemoveReport, LoadOutcome, RemoveOutcome, SessionError,
    SessionResult, ToggleOutcome,
};

// Re-export shared types for convenience
pub use shared::client::{CustomerListResponse, CustomerQuery, FilterMode, ImportResult, PAGE_SIZE};
pub use shared::models::{Customer, CustomerId, Group, GroupId, ValidationStatus};
