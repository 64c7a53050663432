//! The state registry: an explicit table binding each state id to its
//! handler.
//!
//! The table is sorted once at build time and looked up by binary search,
//! so resolving a handler is O(log n) with no reflection involved.

use super::state::{StateHandler, StateId};

/// Ordered mapping from state id to handler.
///
/// Built by [`MachineBuilder`](crate::builder::MachineBuilder) after the
/// configuration has been validated; every id the engine can ever put on
/// the active path is guaranteed to be present.
pub struct Registry<S: StateId> {
    entries: Vec<(S, Box<dyn StateHandler<S>>)>,
}

impl<S: StateId> Registry<S> {
    /// Build a registry from `(id, handler)` pairs. Ids must be unique;
    /// the configuration validator rejects duplicates before this runs.
    pub fn from_entries(mut entries: Vec<(S, Box<dyn StateHandler<S>>)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no states are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether `id` is registered.
    pub fn contains(&self, id: S) -> bool {
        self.entries
            .binary_search_by(|entry| entry.0.cmp(&id))
            .is_ok()
    }

    /// Iterate over the registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.iter().map(|entry| entry.0)
    }

    /// The handler owning `id`.
    ///
    /// Only called with ids from the active path, which validation
    /// guarantees are registered.
    pub fn handler_mut(&mut self, id: S) -> &mut dyn StateHandler<S> {
        let index = self
            .entries
            .binary_search_by(|entry| entry.0.cmp(&id))
            .expect("state ids on the active path are validated at build time");
        self.entries[index].1.as_mut()
    }
}

impl<S: StateId> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.0))
            .finish()
    }
}
