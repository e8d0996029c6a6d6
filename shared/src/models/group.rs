//! Group Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, CustomerId};

/// Identifier of a customer group
pub type GroupId = Uuid;

/// Customer group used for campaign targeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub customer_count: u64,
    /// Full member list; populated only by the group detail endpoint,
    /// which is the membership source of truth.
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Identifiers of the members carried by this detail record
    pub fn member_ids(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.customers.iter().map(|c| c.id)
    }
}
