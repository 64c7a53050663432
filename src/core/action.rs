//! Action callbacks attached to transitions.
//!
//! An action is an optional side effect that runs when its transition rule
//! fires, after the rule is matched and before any state is exited or
//! entered. Actions receive the full `(from, trigger, to)` tuple of the
//! rule that fired.

use super::event::EventId;
use super::state::StateId;

/// Side-effect callback run when a transition fires.
///
/// The callback must be non-blocking: the engine runs it inline on the
/// control loop, with no timeout or interruption mechanism. It must not
/// feed events back into the same machine instance mid-dispatch; enqueue
/// follow-up work from the owning loop instead.
///
/// # Example
///
/// ```rust
/// use strata::core::{Action, EventId, StateId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Open,
/// }
///
/// impl StateId for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum DoorEvent {
///     Unlock,
/// }
///
/// impl EventId for DoorEvent {
///     fn name(&self) -> &str {
///         "Unlock"
///     }
/// }
///
/// let action = Action::new(|from: DoorState, trigger: DoorEvent, to: DoorState| {
///     assert_eq!(from, DoorState::Closed);
///     assert_eq!(trigger, DoorEvent::Unlock);
///     assert_eq!(to, DoorState::Open);
/// });
///
/// action.call(DoorState::Closed, DoorEvent::Unlock, DoorState::Open);
/// ```
pub struct Action<S: StateId, E: EventId> {
    callback: Box<dyn Fn(S, E, S) + Send + Sync>,
}

impl<S: StateId, E: EventId> Action<S, E> {
    /// Create an action from a callback.
    ///
    /// The callback must be thread-safe (`Send + Sync`); side effects on
    /// shared data go through the caller's own synchronization.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(S, E, S) + Send + Sync + 'static,
    {
        Action {
            callback: Box::new(callback),
        }
    }

    /// Invoke the action with the `(from, trigger, to)` of the fired rule.
    pub fn call(&self, from: S, trigger: E, to: S) {
        (self.callback)(from, trigger, to)
    }
}

impl<S: StateId, E: EventId> std::fmt::Debug for Action<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Action")
    }
}
