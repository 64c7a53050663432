//! State identifiers and per-state behavior hooks.
//!
//! Every machine fixes one enumerated domain of state identifiers up front.
//! Behavior is attached per identifier through the `StateHandler` trait,
//! whose hooks are driven by the engine during construction, update cycles,
//! transitions and teardown.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Identifier domain for the states of one machine.
///
/// State ids are small, copyable, totally-ordered values - in practice a
/// fieldless enum. All states of a machine share one id type; the engine
/// never mixes domains.
///
/// # Required Traits
///
/// - `Copy` + `Ord`: ids are passed by value and kept in ordered tables
/// - `Debug`: ids must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: ids must be serializable for checkpoints
///
/// # Example
///
/// ```rust
/// use strata::core::StateId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum PumpState {
///     Off,
///     Priming,
///     Running,
/// }
///
/// impl StateId for PumpState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::Priming => "Priming",
///             Self::Running => "Running",
///         }
///     }
/// }
///
/// assert_eq!(PumpState::Priming.name(), "Priming");
/// ```
pub trait StateId:
    Copy + Ord + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the id's name for display/logging.
    fn name(&self) -> &str;
}

/// Behavior attached to one state id.
///
/// The engine drives these hooks with a fixed contract:
///
/// - `on_entry` runs when the state joins the active path (ancestors first)
/// - `on_active` runs once per [`update`](crate::engine::Machine::update)
///   call for every active state, leaf first; `descendants` holds the
///   already-visited active descendants, leaf-most first, so composite
///   states can observe which branch is live without re-deriving it
/// - `on_exit` runs when the state leaves the active path (leaf first)
///
/// All hooks must return promptly: the engine never suspends, and provides
/// no timeout or interruption mechanism for a hook that stalls the loop.
/// Every method defaults to a no-op, so handlers implement only what they
/// need.
///
/// # Example
///
/// ```rust
/// use strata::core::{StateHandler, StateId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum ValveState {
///     Closed,
///     Open,
/// }
///
/// impl StateId for ValveState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// struct OpenValve {
///     ticks: u32,
/// }
///
/// impl StateHandler<ValveState> for OpenValve {
///     fn on_entry(&mut self) {
///         self.ticks = 0;
///     }
///
///     fn on_active(&mut self, _descendants: &[ValveState]) {
///         self.ticks += 1;
///     }
/// }
/// ```
pub trait StateHandler<S: StateId>: Send {
    /// Called when this state becomes active.
    fn on_entry(&mut self) {}

    /// Called once per update cycle while this state is active.
    ///
    /// `descendants` lists the active states below this one, leaf-most
    /// first. A leaf receives an empty slice.
    fn on_active(&mut self, descendants: &[S]) {
        let _ = descendants;
    }

    /// Called when this state stops being active.
    fn on_exit(&mut self) {}
}

/// The null handler, for states with no behavior of their own.
impl<S: StateId> StateHandler<S> for () {}
