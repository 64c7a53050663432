//! Trigger event identifiers.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Identifier domain for the trigger events of one machine.
///
/// Like [`StateId`](crate::core::StateId), this is a second fixed enumerated
/// type shared by every transition of a machine. Events carry no payload:
/// they are pure triggers matched against the transition table.
///
/// # Example
///
/// ```rust
/// use strata::core::EventId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum PumpEvent {
///     Start,
///     Stop,
///     FaultDetected,
/// }
///
/// impl EventId for PumpEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Start => "Start",
///             Self::Stop => "Stop",
///             Self::FaultDetected => "FaultDetected",
///         }
///     }
/// }
///
/// assert_eq!(PumpEvent::Stop.name(), "Stop");
/// ```
pub trait EventId:
    Copy + Ord + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
