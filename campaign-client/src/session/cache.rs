//! PageCache - incrementally accumulated candidate list
//!
//! Append-only list of customers fetched page by page from the search
//! endpoint (infinite scroll). The cursor only advances after a
//! successful, non-empty fetch; a page shorter than `PAGE_SIZE` marks
//! the cache exhausted. Every load carries the filter epoch it was
//! issued under, so a response that outlives a reset is dropped instead
//! of appended to the new epoch's rows.

use shared::client::PAGE_SIZE;
use shared::models::{Customer, CustomerId};

/// Ticket for one outstanding page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Filter epoch active when the fetch was issued
    pub epoch: u64,
    /// Page number to request (1-based)
    pub page: u32,
}

/// Accumulated candidate pages for one filter epoch
#[derive(Debug)]
pub struct PageCache {
    rows: Vec<Customer>,
    next_page: u32,
    exhausted: bool,
    loading: bool,
    epoch: u64,
    total: u64,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_page: 1,
            exhausted: false,
            loading: false,
            epoch: 0,
            total: 0,
        }
    }

    /// Discard everything and start a new epoch: empty rows, cursor back
    /// to page 1, exhaustion and in-flight guard cleared.
    pub fn reset(&mut self, epoch: u64) {
        self.rows.clear();
        self.next_page = 1;
        self.exhausted = false;
        self.loading = false;
        self.total = 0;
        self.epoch = epoch;
        tracing::debug!(epoch, "Page cache reset");
    }

    /// Claim the next page fetch. Returns `None` when the list is
    /// exhausted or a load is already in flight, collapsing concurrent
    /// callers to a single request.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.exhausted || self.loading {
            return None;
        }
        self.loading = true;
        Some(LoadTicket {
            epoch: self.epoch,
            page: self.next_page,
        })
    }

    /// Append a fetched page. Returns `false` (and changes nothing) when
    /// the ticket belongs to a discarded epoch.
    pub fn apply_page(&mut self, ticket: LoadTicket, customers: Vec<Customer>, total: u64) -> bool {
        if ticket.epoch != self.epoch {
            tracing::warn!(
                stale_epoch = ticket.epoch,
                current_epoch = self.epoch,
                page = ticket.page,
                "Dropping page response from a discarded filter epoch"
            );
            return false;
        }

        self.loading = false;
        self.exhausted = (customers.len() as u32) < PAGE_SIZE;
        if !customers.is_empty() {
            self.next_page += 1;
        }
        self.total = total;
        self.rows.extend(customers);

        tracing::debug!(
            epoch = self.epoch,
            page = ticket.page,
            rows = self.rows.len(),
            exhausted = self.exhausted,
            "Page applied"
        );
        true
    }

    /// Release the in-flight guard after a failed fetch. Cursor,
    /// exhaustion flag and accumulated rows are untouched.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if ticket.epoch == self.epoch {
            self.loading = false;
        }
    }

    /// Accumulated rows, in server order
    pub fn customers(&self) -> &[Customer] {
        &self.rows
    }

    /// Look up one loaded candidate
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.rows.iter().find(|c| c.id == id)
    }

    /// Identifiers of all loaded rows, in server order
    pub fn ids(&self) -> Vec<CustomerId> {
        self.rows.iter().map(|c| c.id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Next page the cursor will request
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Server-reported total matching the active filter
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}
