//! Request/response DTOs for the campaign audience API
//!
//! Shared between the backend contract and the client engine.

use serde::{Deserialize, Serialize};

use crate::models::{Customer, CustomerId, GroupId};

/// Page capacity of the customer list endpoint.
///
/// Shared by the page cache (exhaustion test) and the query builder:
/// a page shorter than this signals the last page.
pub const PAGE_SIZE: u32 = 20;

/// Membership filter applied server-side by the customer list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// No membership predicate
    #[default]
    All,
    /// Only customers already in the group (`filter_type=in_group`)
    InGroup,
    /// Only customers not in the group (`filter_type=not_in_group`)
    NotInGroup,
}

impl FilterMode {
    /// Wire value for the `filter_type` query parameter; `All` sends none
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            FilterMode::All => None,
            FilterMode::InGroup => Some("in_group"),
            FilterMode::NotInGroup => Some("not_in_group"),
        }
    }

    /// Whether membership changes affect which customers this filter matches
    pub fn depends_on_membership(&self) -> bool {
        !matches!(self, FilterMode::All)
    }
}

/// Query parameters for `GET /customers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerQuery {
    /// Page number (1-based)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Substring search over phone/name/company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Group the membership filter is evaluated against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_group_id: Option<GroupId>,
    /// Membership predicate, delegated to the backend
    #[serde(default)]
    pub filter_type: FilterMode,
}

impl CustomerQuery {
    /// Query for one page with no search and no membership filter
    pub fn page(page: u32) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
            search: None,
            filter_group_id: None,
            filter_type: FilterMode::All,
        }
    }

    /// Set the search text (empty text clears it)
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Apply a membership filter against a group
    pub fn filter(mut self, mode: FilterMode, group_id: GroupId) -> Self {
        self.filter_type = mode;
        self.filter_group_id = mode.query_value().map(|_| group_id);
        self
    }

    /// Key/value pairs for the request query string
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let (Some(group_id), Some(filter_type)) = (self.filter_group_id, self.filter_type.query_value()) {
            pairs.push(("filter_group_id", group_id.to_string()));
            pairs.push(("filter_type", filter_type.to_string()));
        }
        pairs
    }
}

/// Payload of `GET /customers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerListResponse {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Body of `POST /groups/{id}/members`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGroupMembersRequest {
    pub customer_ids: Vec<CustomerId>,
}

/// Payload of `POST /customers/import`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}
