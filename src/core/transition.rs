//! Declarative transition rules.

use super::action::Action;
use super::event::EventId;
use super::state::StateId;

/// One row of the transition table: `(from, trigger, to)` plus an optional
/// action run when the rule fires.
///
/// Rules are matched against the current leaf first, then against each
/// ancestor in turn (event bubbling). Configuration validation guarantees
/// that at most one rule exists per `(from, trigger)` pair, so matching is
/// deterministic, and that `from != to`.
pub struct TransitionRule<S: StateId, E: EventId> {
    /// Source state the rule fires from. May be a composite state; the rule
    /// then catches events that bubble up from any active descendant.
    pub from: S,
    /// Event that triggers the rule.
    pub trigger: E,
    /// Target state. May be a composite state; entry cascades through its
    /// default children down to a leaf.
    pub to: S,
    /// Optional side effect, invoked with `(from, trigger, to)` before the
    /// state change executes.
    pub action: Option<Action<S, E>>,
}

impl<S: StateId, E: EventId> TransitionRule<S, E> {
    /// Create a rule with no action.
    pub fn new(from: S, trigger: E, to: S) -> Self {
        Self {
            from,
            trigger,
            to,
            action: None,
        }
    }

    /// Attach an action callback to the rule.
    pub fn with_action<F>(mut self, callback: F) -> Self
    where
        F: Fn(S, E, S) + Send + Sync + 'static,
    {
        self.action = Some(Action::new(callback));
        self
    }

    /// Check whether this rule fires for `candidate` on `trigger`.
    pub fn matches(&self, candidate: S, trigger: E) -> bool {
        self.from == candidate && self.trigger == trigger
    }
}

impl<S: StateId, E: EventId> std::fmt::Debug for TransitionRule<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("trigger", &self.trigger)
            .field("to", &self.to)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
