//! Audience selection session
//!
//! One `AudienceSession` per open membership-management view. It owns
//! the page cache, selection, membership and filter state behind a
//! single async mutex and orchestrates the backend calls around them:
//! epoch-tagged page loads, debounced search, optimistic single toggles
//! with exact rollback, and two-phase bulk add/remove with a trailing
//! authoritative membership refresh.
//!
//! The lock is never held across a network await; completions that
//! arrive in any order are applied atomically against current state.

pub mod cache;
pub mod debounce;
pub mod filter;
pub mod membership;
pub mod selection;

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use shared::client::FilterMode;
use shared::models::{Customer, CustomerId, GroupId};

use crate::api::CampaignApi;
use crate::error::ClientError;

pub use cache::{LoadTicket, PageCache};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filter::FilterContext;
pub use membership::{MemberSnapshot, MembershipState};
pub use selection::SelectionSet;

/// Session error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Candidate failed the readiness gate
    #[error("Customer {0} is not ready to receive messages")]
    NotReady(CustomerId),

    /// Bulk operation requested with nothing selected
    #[error("No customers selected")]
    EmptySelection,

    /// Readiness gating dropped every selected candidate
    #[error("None of the selected customers are ready to receive messages")]
    NoEligibleCustomers,

    /// A membership change for this customer is already in flight
    #[error("A membership change for customer {0} is already in flight")]
    ToggleInFlight(CustomerId),

    /// Operation requires an owning group
    #[error("No group selected")]
    NoGroup,

    /// Backend or transport failure
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result of one `load_next_page` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and appended
    Loaded { appended: usize },
    /// No request issued: list exhausted or a load already in flight
    Skipped,
    /// The response belonged to a discarded filter epoch and was dropped
    Stale,
}

/// Membership change committed by a single toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Readiness-gated plan for a bulk add
///
/// When `skipped() > 0` the UI must show the discrepancy and get an
/// explicit confirmation before executing with the reduced set.
#[derive(Debug, Clone)]
pub struct BulkAddPlan {
    /// Ids the user selected
    pub requested: Vec<CustomerId>,
    /// Ids that passed the readiness gate, in loaded order
    pub eligible: Vec<CustomerId>,
}

impl BulkAddPlan {
    /// How many requested ids were dropped by the readiness gate
    pub fn skipped(&self) -> usize {
        self.requested.len() - self.eligible.len()
    }

    pub fn needs_confirmation(&self) -> bool {
        self.skipped() > 0
    }
}

/// Per-identifier result of a fan-out bulk remove
#[derive(Debug)]
pub struct RemoveOutcome {
    pub customer_id: CustomerId,
    pub result: Result<(), ClientError>,
}

impl RemoveOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fan-in report of one bulk remove
///
/// Best-effort semantics: failed ids may or may not have been removed
/// server-side; the membership refresh that follows the fan-out is the
/// sole reconciliation of whatever partial result actually occurred.
#[derive(Debug)]
pub struct BulkRemoveReport {
    pub outcomes: Vec<RemoveOutcome>,
}

impl BulkRemoveReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(RemoveOutcome::succeeded)
    }

    /// Ids whose remove call failed
    pub fn failed(&self) -> Vec<CustomerId> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.customer_id)
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

struct SessionState {
    filter: FilterContext,
    cache: PageCache,
    selection: SelectionSet,
    membership: MembershipState,
    /// Per-identifier guard: a second toggle on an id with one already
    /// in flight is rejected instead of racing.
    toggles_in_flight: HashSet<CustomerId>,
    debouncer: Debouncer,
}

/// The reconciliation engine behind one membership-management view
#[derive(Clone)]
pub struct AudienceSession {
    api: Arc<dyn CampaignApi>,
    state: Arc<Mutex<SessionState>>,
}

impl AudienceSession {
    pub fn new(api: Arc<dyn CampaignApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(SessionState {
                filter: FilterContext::new(),
                cache: PageCache::new(),
                selection: SelectionSet::new(),
                membership: MembershipState::new(),
                toggles_in_flight: HashSet::new(),
                debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            })),
        }
    }

    // ========== View lifecycle ==========

    /// Open the view for a group: authoritative membership fetch, fresh
    /// filter epoch, first candidate page. Clears any previous selection.
    pub async fn open_group(&self, group_id: GroupId) -> SessionResult<()> {
        let group = self.api.get_group(group_id).await?;
        {
            let mut state = self.state.lock().await;
            state.selection.clear();
            state.membership.replace_from(&group);
            let epoch = state.filter.open_group(group_id);
            state.cache.reset(epoch);
        }
        self.load_next_page().await?;
        Ok(())
    }

    /// Close the view: pending debounced search cancelled, selection
    /// dropped. The session can be reopened with `open_group`.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.debouncer.cancel();
        state.selection.clear();
    }

    // ========== Candidate list ==========

    /// Fetch one more page under the in-flight and exhaustion guards.
    /// Concurrent calls collapse to a single request; a failed fetch
    /// leaves cursor and accumulated rows untouched.
    pub async fn load_next_page(&self) -> SessionResult<LoadOutcome> {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            match state.cache.begin_load() {
                Some(ticket) => (ticket, state.filter.query(ticket.page)),
                None => return Ok(LoadOutcome::Skipped),
            }
        };

        match self.api.list_customers(&query).await {
            Ok(response) => {
                let mut state = self.state.lock().await;
                let appended = response.customers.len();
                if state.cache.apply_page(ticket, response.customers, response.total) {
                    Ok(LoadOutcome::Loaded { appended })
                } else {
                    Ok(LoadOutcome::Stale)
                }
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.cache.fail_load(ticket);
                Err(SessionError::Client(e))
            }
        }
    }

    /// Debounced search entry point: coalesces rapid keystrokes into a
    /// single `apply_search` after the quiet period.
    pub async fn search_debounced(&self, text: impl Into<String>) {
        let text = text.into();
        let session = self.clone();
        let mut state = self.state.lock().await;
        state.debouncer.schedule(async move {
            if let Err(e) = session.apply_search(text).await {
                tracing::warn!(error = %e, "Debounced search failed");
            }
        });
    }

    /// Apply a search immediately: new epoch, cache reset, first page
    pub async fn apply_search(&self, text: impl Into<String>) -> SessionResult<LoadOutcome> {
        {
            let mut state = self.state.lock().await;
            let epoch = state.filter.set_search(text);
            state.cache.reset(epoch);
        }
        self.load_next_page().await
    }

    /// Switch the membership filter mode: new epoch, cache reset, reload
    pub async fn set_filter_mode(&self, mode: FilterMode) -> SessionResult<LoadOutcome> {
        {
            let mut state = self.state.lock().await;
            let epoch = state.filter.set_mode(mode);
            state.cache.reset(epoch);
        }
        self.load_next_page().await
    }

    // ========== Selection ==========

    /// Toggle one id in the selection; returns whether it is selected now
    pub async fn toggle_selection(&self, id: CustomerId) -> bool {
        self.state.lock().await.selection.toggle(id)
    }

    /// Toggle-all over the loaded rows as one atomic operation
    pub async fn toggle_select_all_loaded(&self) {
        let mut state = self.state.lock().await;
        let loaded = state.cache.ids();
        state.selection.toggle_all(&loaded);
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.selection.clear();
    }

    pub async fn selected_count(&self) -> usize {
        self.state.lock().await.selection.len()
    }

    pub async fn is_selected(&self, id: CustomerId) -> bool {
        self.state.lock().await.selection.contains(id)
    }

    // ========== Membership ==========

    /// Replace membership wholesale from the group detail record.
    /// Last response wins when refreshes race; the design accepts that
    /// staleness over strict ordering.
    pub async fn refresh_membership(&self) -> SessionResult<usize> {
        let group_id = self.group_id().await.ok_or(SessionError::NoGroup)?;
        let group = self.api.get_group(group_id).await?;
        let mut state = self.state.lock().await;
        state.membership.replace_from(&group);
        Ok(state.membership.len())
    }

    /// Toggle one customer's membership.
    ///
    /// Optimistic: membership is mutated before the backend call and
    /// restored from a snapshot if the call fails. Success triggers the
    /// authoritative refresh, and a reset of the candidate list when the
    /// active filter depends on membership. Adding is gated on
    /// readiness; removal is always permitted.
    pub async fn toggle_member(&self, customer_id: CustomerId) -> SessionResult<ToggleOutcome> {
        let (group_id, snapshot, adding) = {
            let mut state = self.state.lock().await;
            let group_id = state.filter.group_id().ok_or(SessionError::NoGroup)?;
            if state.toggles_in_flight.contains(&customer_id) {
                return Err(SessionError::ToggleInFlight(customer_id));
            }

            let adding = !state.membership.is_member(customer_id);
            if adding {
                let ready = state
                    .cache
                    .customer(customer_id)
                    .map(|c| c.is_ready)
                    .unwrap_or(false);
                if !ready {
                    return Err(SessionError::NotReady(customer_id));
                }
            }

            let snapshot = state.membership.set(customer_id, adding);
            state.toggles_in_flight.insert(customer_id);
            (group_id, snapshot, adding)
        };

        let result = if adding {
            self.api.add_group_members(group_id, &[customer_id]).await
        } else {
            self.api.remove_group_member(group_id, customer_id).await
        };

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    state.toggles_in_flight.remove(&customer_id);
                }
                tracing::debug!(customer_id = %customer_id, adding, "Membership toggle committed");

                self.refresh_membership().await?;
                self.invalidate_membership_view().await;

                Ok(if adding {
                    ToggleOutcome::Added
                } else {
                    ToggleOutcome::Removed
                })
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.membership.restore(snapshot);
                state.toggles_in_flight.remove(&customer_id);
                tracing::warn!(customer_id = %customer_id, error = %e, "Membership toggle rolled back");
                Err(SessionError::Client(e))
            }
        }
    }

    pub async fn is_member(&self, id: CustomerId) -> bool {
        self.state.lock().await.membership.is_member(id)
    }

    pub async fn member_count(&self) -> usize {
        self.state.lock().await.membership.len()
    }

    // ========== Bulk operations ==========

    /// Partition the selection by readiness. Errors when the selection
    /// is empty or the readiness gate drops everything; a plan with
    /// `needs_confirmation()` must be confirmed by the user before
    /// `execute_bulk_add`.
    pub async fn plan_bulk_add(&self) -> SessionResult<BulkAddPlan> {
        let state = self.state.lock().await;
        state.filter.group_id().ok_or(SessionError::NoGroup)?;
        if state.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let requested = state.selection.ids();
        // ids no longer in the loaded window cannot be verified ready
        let eligible: Vec<CustomerId> = state
            .cache
            .customers()
            .iter()
            .filter(|c| c.is_ready && state.selection.contains(c.id))
            .map(|c| c.id)
            .collect();

        if eligible.is_empty() {
            return Err(SessionError::NoEligibleCustomers);
        }
        Ok(BulkAddPlan {
            requested,
            eligible,
        })
    }

    /// Execute a confirmed bulk add: one backend call with the eligible
    /// ids, no optimistic pre-mutation (nothing to roll back on
    /// failure). Success refreshes membership, clears the selection and
    /// resets a non-member view.
    pub async fn execute_bulk_add(&self, plan: &BulkAddPlan) -> SessionResult<usize> {
        let group_id = self.group_id().await.ok_or(SessionError::NoGroup)?;
        if plan.eligible.is_empty() {
            return Err(SessionError::NoEligibleCustomers);
        }

        self.api.add_group_members(group_id, &plan.eligible).await?;
        tracing::debug!(group_id = %group_id, added = plan.eligible.len(), "Bulk add committed");

        self.refresh_membership().await?;
        {
            let mut state = self.state.lock().await;
            state.selection.clear();
        }
        if self.filter_mode().await == FilterMode::NotInGroup {
            self.invalidate_membership_view().await;
        }
        Ok(plan.eligible.len())
    }

    /// Count for the bulk-remove confirmation dialog
    pub async fn plan_bulk_remove(&self) -> SessionResult<usize> {
        let state = self.state.lock().await;
        state.filter.group_id().ok_or(SessionError::NoGroup)?;
        if state.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        Ok(state.selection.len())
    }

    /// Execute a confirmed bulk remove.
    ///
    /// The backend has no bulk-remove primitive, so this fans out one
    /// remove call per selected id concurrently and fans the results
    /// back in as per-identifier outcomes. The membership refresh runs
    /// regardless of the aggregate result and is the sole
    /// reconciliation for partial failures. The selection is cleared in
    /// every case.
    pub async fn execute_bulk_remove(&self) -> SessionResult<BulkRemoveReport> {
        let (group_id, ids) = {
            let state = self.state.lock().await;
            let group_id = state.filter.group_id().ok_or(SessionError::NoGroup)?;
            (group_id, state.selection.ids())
        };
        if ids.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let calls = ids.into_iter().map(|customer_id| {
            let api = self.api.clone();
            async move {
                RemoveOutcome {
                    customer_id,
                    result: api.remove_group_member(group_id, customer_id).await,
                }
            }
        });
        let outcomes = futures::future::join_all(calls).await;
        let report = BulkRemoveReport { outcomes };

        if !report.all_succeeded() {
            tracing::warn!(
                group_id = %group_id,
                failed = report.failures(),
                total = report.total(),
                "Bulk remove partially failed"
            );
        }

        // reconcile to whatever partial result occurred server-side
        let refresh = self.refresh_membership().await;
        {
            let mut state = self.state.lock().await;
            state.selection.clear();
        }
        if self.filter_mode().await.depends_on_membership() {
            self.invalidate_membership_view().await;
        }
        refresh?;

        Ok(report)
    }

    // ========== View accessors ==========

    pub async fn customers(&self) -> Vec<Customer> {
        self.state.lock().await.cache.customers().to_vec()
    }

    pub async fn is_exhausted(&self) -> bool {
        self.state.lock().await.cache.is_exhausted()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.cache.is_loading()
    }

    pub async fn total(&self) -> u64 {
        self.state.lock().await.cache.total()
    }

    pub async fn group_id(&self) -> Option<GroupId> {
        self.state.lock().await.filter.group_id()
    }

    pub async fn filter_mode(&self) -> FilterMode {
        self.state.lock().await.filter.mode()
    }

    pub async fn search_text(&self) -> String {
        self.state.lock().await.filter.search().to_string()
    }

    // ========== Internal ==========

    /// After a committed membership mutation, a member/non-member view
    /// no longer matches the server predicate: start a new epoch and
    /// reload page 1. The mutation is already committed, so a failing
    /// trailing reload is logged, not surfaced.
    async fn invalidate_membership_view(&self) {
        {
            let mut state = self.state.lock().await;
            if !state.filter.mode().depends_on_membership() {
                return;
            }
            let epoch = state.filter.invalidate();
            state.cache.reset(epoch);
        }
        if let Err(e) = self.load_next_page().await {
            tracing::warn!(error = %e, "Reload after membership change failed");
        }
    }
}
