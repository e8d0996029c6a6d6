//! MembershipState - authoritative member set with an optimistic window
//!
//! Sourced only from the group detail fetch, except for the window
//! between an optimistic toggle and its confirmation. Rollback restores
//! the snapshotted prior value verbatim rather than reconstructing the
//! opposite mutation.

use std::collections::HashSet;

use shared::models::{CustomerId, Group};

/// Snapshot of one identifier's membership before an optimistic toggle
#[derive(Debug, Clone, Copy)]
pub struct MemberSnapshot {
    id: CustomerId,
    was_member: bool,
}

/// Identifiers currently belonging to the target group
#[derive(Debug, Default)]
pub struct MembershipState {
    members: HashSet<CustomerId>,
}

impl MembershipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_member(&self, id: CustomerId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> Vec<CustomerId> {
        self.members.iter().copied().collect()
    }

    /// Optimistically set one identifier's membership, returning the
    /// snapshot needed to restore it exactly on failure.
    pub fn set(&mut self, id: CustomerId, member: bool) -> MemberSnapshot {
        let was_member = if member {
            !self.members.insert(id)
        } else {
            self.members.remove(&id)
        };
        MemberSnapshot { id, was_member }
    }

    /// Undo one optimistic mutation
    pub fn restore(&mut self, snapshot: MemberSnapshot) {
        if snapshot.was_member {
            self.members.insert(snapshot.id);
        } else {
            self.members.remove(&snapshot.id);
        }
    }

    /// Wholesale replacement from an authoritative group detail record
    pub fn replace_from(&mut self, group: &Group) {
        self.members = group.member_ids().collect();
        tracing::debug!(group_id = %group.id, members = self.members.len(), "Membership reconciled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_set_and_restore_are_exact_inverses() {
        let mut membership = MembershipState::new();
        let id = Uuid::new_v4();

        let snapshot = membership.set(id, true);
        assert!(membership.is_member(id));
        membership.restore(snapshot);
        assert!(!membership.is_member(id));

        membership.set(id, true);
        let snapshot = membership.set(id, false);
        assert!(!membership.is_member(id));
        membership.restore(snapshot);
        assert!(membership.is_member(id));
    }

    #[test]
    fn test_restore_of_noop_mutation_is_noop() {
        let mut membership = MembershipState::new();
        let id = Uuid::new_v4();
        membership.set(id, true);

        // setting an existing member again snapshots "was member"
        let snapshot = membership.set(id, true);
        membership.restore(snapshot);
        assert!(membership.is_member(id));
        assert_eq!(membership.len(), 1);
    }
}
