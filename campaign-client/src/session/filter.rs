//! FilterContext - the active (search text, membership filter) tuple
//!
//! Parameterizes what the page cache fetches. Changing any field starts
//! a new epoch; the cache must be reset to that epoch before the first
//! fetch of the new configuration. The backend owns the match
//! predicate, so even a change back to a previous value re-fetches.

use shared::client::{CustomerQuery, FilterMode};
use shared::models::GroupId;

/// Active filter configuration and its epoch counter
#[derive(Debug, Clone)]
pub struct FilterContext {
    search: String,
    mode: FilterMode,
    group_id: Option<GroupId>,
    epoch: u64,
}

impl FilterContext {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            mode: FilterMode::All,
            group_id: None,
            epoch: 0,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    fn bump(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Set the search text; returns the new epoch
    pub fn set_search(&mut self, text: impl Into<String>) -> u64 {
        self.search = text.into();
        self.bump()
    }

    /// Set the membership filter mode; returns the new epoch
    pub fn set_mode(&mut self, mode: FilterMode) -> u64 {
        self.mode = mode;
        self.bump()
    }

    /// Switch to a new owning group: search and mode go back to their
    /// defaults, the view starts over. Returns the new epoch.
    pub fn open_group(&mut self, group_id: GroupId) -> u64 {
        self.group_id = Some(group_id);
        self.search.clear();
        self.mode = FilterMode::All;
        self.bump()
    }

    /// Start a new epoch without changing any field. Used when a
    /// membership mutation invalidates a membership-dependent view.
    pub fn invalidate(&mut self) -> u64 {
        self.bump()
    }

    /// Query for one page under the current configuration
    pub fn query(&self, page: u32) -> CustomerQuery {
        let mut query = CustomerQuery::page(page).search(self.search.clone());
        if let Some(group_id) = self.group_id {
            query = query.filter(self.mode, group_id);
        }
        query
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new()
    }
}
