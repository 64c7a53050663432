//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Action, EventId, StateId, TransitionRule};

/// Builder for constructing transition rules with a fluent API.
///
/// [`TransitionRule::new`] covers the common case directly; the builder is
/// for call sites that assemble rules piecemeal, e.g. from configuration
/// tables.
pub struct RuleBuilder<S: StateId, E: EventId> {
    from: Option<S>,
    trigger: Option<E>,
    to: Option<S>,
    action: Option<Action<S, E>>,
}

impl<S: StateId, E: EventId> RuleBuilder<S, E> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self {
            from: None,
            trigger: None,
            to: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the trigger event (required).
    pub fn trigger(mut self, event: E) -> Self {
        self.trigger = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Attach an action callback (optional).
    pub fn action<F>(mut self, callback: F) -> Self
    where
        F: Fn(S, E, S) + Send + Sync + 'static,
    {
        self.action = Some(Action::new(callback));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule<S, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionRule {
            from,
            trigger,
            to,
            action: self.action,
        })
    }
}

impl<S: StateId, E: EventId> Default for RuleBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
