//! State nesting: substate groups and the hierarchy table.
//!
//! The hierarchy is a forest: each group declares one parent, its default
//! child, and any further children. A state appears as a parent in at most
//! one group and as a child under at most one parent - configuration
//! validation enforces this before a `Hierarchy` reaches the engine.

use super::state::StateId;
use crate::bounded::BoundedVec;

/// One parent state and its children.
///
/// The children of a group are `default_child` plus `other_children`. The
/// default child is the one entered automatically when the parent is
/// activated without a more specific target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstateGroup<S: StateId> {
    /// The composite (super) state.
    pub parent: S,
    /// Child entered when the parent is activated without a deeper target.
    pub default_child: S,
    /// Remaining children, if any.
    pub other_children: Vec<S>,
}

impl<S: StateId> SubstateGroup<S> {
    /// Create a group from a parent, its default child and the remaining
    /// children.
    pub fn new(parent: S, default_child: S, other_children: impl IntoIterator<Item = S>) -> Self {
        Self {
            parent,
            default_child,
            other_children: other_children.into_iter().collect(),
        }
    }

    /// Iterate over all children, default child first.
    pub fn children(&self) -> impl Iterator<Item = S> + '_ {
        std::iter::once(self.default_child).chain(self.other_children.iter().copied())
    }

    /// Check whether `id` is a child of this group.
    pub fn contains_child(&self, id: S) -> bool {
        self.children().any(|child| child == id)
    }
}

/// The validated parent/child table of one machine.
///
/// Lookups scan the group list linearly; hierarchies are small and fixed,
/// so the scan is bounded by the configuration size.
#[derive(Clone, Debug)]
pub struct Hierarchy<S: StateId> {
    groups: Vec<SubstateGroup<S>>,
}

impl<S: StateId> Hierarchy<S> {
    /// Build a hierarchy from validated groups.
    pub fn new(groups: Vec<SubstateGroup<S>>) -> Self {
        Self { groups }
    }

    /// Check whether the hierarchy is flat (no nesting declared).
    pub fn is_trivial(&self) -> bool {
        self.groups.is_empty()
    }

    /// The declared groups.
    pub fn groups(&self) -> &[SubstateGroup<S>] {
        &self.groups
    }

    /// The parent of `id`, or `None` for a root state.
    pub fn find_parent(&self, id: S) -> Option<S> {
        self.groups
            .iter()
            .find(|group| group.contains_child(id))
            .map(|group| group.parent)
    }

    /// The default child of `id`, or `None` if `id` is a leaf.
    pub fn default_child(&self, id: S) -> Option<S> {
        self.groups
            .iter()
            .find(|group| group.parent == id)
            .map(|group| group.default_child)
    }

    /// Check whether `id` has no children.
    pub fn is_leaf(&self, id: S) -> bool {
        self.default_child(id).is_none()
    }

    /// Fill `out` with the chain from the root down to `id` inclusive,
    /// root-most first. For a flat hierarchy this is the single-element
    /// path `[id]`.
    pub fn path_to_root(&self, id: S, out: &mut BoundedVec<S>) {
        out.clear();
        let mut cursor = Some(id);
        while let Some(state) = cursor {
            let pushed = out.push(state);
            debug_assert!(pushed, "path storage must be sized to the max depth");
            cursor = self.find_parent(state);
        }
        out.reverse();
    }

    /// Extend `path` through default children until its last element is a
    /// leaf. A path already ending at a leaf is unchanged.
    pub fn cascade(&self, path: &mut BoundedVec<S>) {
        while let Some(child) = path.last().and_then(|&last| self.default_child(last)) {
            let pushed = path.push(child);
            debug_assert!(pushed, "path storage must be sized to the max depth");
        }
    }
}
