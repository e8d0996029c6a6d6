//! SelectionSet - identifiers checked for a bulk operation
//!
//! Independent of the page cache content; cleared when the owning view
//! closes, when the target group changes, or after a bulk operation
//! completes.

use std::collections::HashSet;

use shared::models::CustomerId;

/// Set of customer ids explicitly checked by the user
#[derive(Debug, Default)]
pub struct SelectionSet {
    ids: HashSet<CustomerId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one id; returns whether it is selected afterwards
    pub fn toggle(&mut self, id: CustomerId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<CustomerId> {
        self.ids.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether every loaded row is currently selected
    pub fn all_selected(&self, loaded: &[CustomerId]) -> bool {
        !loaded.is_empty() && loaded.iter().all(|id| self.ids.contains(id))
    }

    /// Toggle-all over the loaded rows as one atomic operation: if every
    /// loaded id is already selected, deselect them all; otherwise
    /// select them all. Selections outside `loaded` are untouched.
    pub fn toggle_all(&mut self, loaded: &[CustomerId]) {
        if self.all_selected(loaded) {
            for id in loaded {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(loaded.iter().copied());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<CustomerId> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_toggle_roundtrip() {
        let mut selection = SelectionSet::new();
        let id = Uuid::new_v4();

        assert!(selection.toggle(id));
        assert!(selection.contains(id));
        assert!(!selection.toggle(id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_selects_then_deselects() {
        let mut selection = SelectionSet::new();
        let loaded = ids(5);

        selection.toggle_all(&loaded);
        assert_eq!(selection.len(), 5);
        assert!(selection.all_selected(&loaded));

        selection.toggle_all(&loaded);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let mut selection = SelectionSet::new();
        let loaded = ids(4);
        selection.toggle(loaded[0]);

        // not all selected yet, so the toggle selects the rest
        selection.toggle_all(&loaded);
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn test_toggle_all_keeps_ids_outside_loaded_window() {
        let mut selection = SelectionSet::new();
        let loaded = ids(3);
        let other = Uuid::new_v4();
        selection.toggle(other);

        selection.toggle_all(&loaded);
        selection.toggle_all(&loaded);
        assert!(selection.contains(other));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_empty_loaded_is_never_all_selected() {
        let selection = SelectionSet::new();
        assert!(!selection.all_selected(&[]));
    }
}
