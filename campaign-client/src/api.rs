//! Backend API seam
//!
//! The session engine talks to the backend through this trait so tests
//! can substitute a scripted in-memory implementation for the real
//! HTTP client.

use async_trait::async_trait;
use shared::client::{CustomerListResponse, CustomerQuery};
use shared::models::{CustomerId, Group, GroupId};

use crate::error::ClientResult;

/// Campaign backend operations used by the audience session
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// One page of the searchable, membership-filtered candidate list
    async fn list_customers(&self, query: &CustomerQuery) -> ClientResult<CustomerListResponse>;

    /// Group detail record; its member list is the membership source of truth
    async fn get_group(&self, group_id: GroupId) -> ClientResult<Group>;

    /// Add customers to a group in one call
    async fn add_group_members(
        &self,
        group_id: GroupId,
        customer_ids: &[CustomerId],
    ) -> ClientResult<()>;

    /// Remove a single member. The backend exposes no bulk-remove
    /// primitive; bulk removal fans out over this call.
    async fn remove_group_member(
        &self,
        group_id: GroupId,
        customer_id: CustomerId,
    ) -> ClientResult<()>;
}
