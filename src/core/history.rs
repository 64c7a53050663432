//! Transition trace: a bounded record of applied transitions.
//!
//! The engine appends one record per fired rule. The trace is capacity
//! bounded: when full, recording evicts the oldest entry, so memory use
//! stays fixed no matter how long the machine runs. Recording is
//! immutable - `record` returns a new trace with the entry added.

use super::event::EventId;
use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of records a trace keeps unless configured otherwise.
pub const DEFAULT_TRACE_CAPACITY: usize = 64;

/// Record of a single fired transition.
///
/// `from` is the state the matched rule fired from, which may be an
/// ancestor of the leaf that was active when the event arrived (event
/// bubbling).
///
/// # Example
///
/// ```rust
/// use strata::core::{EventId, StateId, TransitionRecord};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// impl StateId for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///         }
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum TaskEvent {
///     Dispatch,
/// }
///
/// impl EventId for TaskEvent {
///     fn name(&self) -> &str {
///         "Dispatch"
///     }
/// }
///
/// let record = TransitionRecord {
///     from: TaskState::Pending,
///     trigger: TaskEvent::Dispatch,
///     to: TaskState::Running,
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: StateId, E: EventId> {
    /// Source state of the matched rule.
    pub from: S,
    /// Event that fired the rule.
    pub trigger: E,
    /// Target state of the matched rule.
    pub to: S,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered trace of fired transitions.
///
/// # Example
///
/// ```rust
/// use strata::core::{EventId, StateId, TransitionRecord, TransitionTrace};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum Step {
///     A,
///     B,
/// }
///
/// impl StateId for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///         }
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum Tick {
///     Next,
/// }
///
/// impl EventId for Tick {
///     fn name(&self) -> &str {
///         "Next"
///     }
/// }
///
/// let trace = TransitionTrace::new();
/// let trace = trace.record(TransitionRecord {
///     from: Step::A,
///     trigger: Tick::Next,
///     to: Step::B,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(trace.len(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionTrace<S: StateId, E: EventId> {
    capacity: usize,
    records: Vec<TransitionRecord<S, E>>,
}

impl<S: StateId, E: EventId> Default for TransitionTrace<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId, E: EventId> TransitionTrace<S, E> {
    /// Create an empty trace with [`DEFAULT_TRACE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRACE_CAPACITY)
    }

    /// Create an empty trace keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Vec::new(),
        }
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a transition, returning a new trace.
    ///
    /// The original trace is unchanged. When the trace is at capacity the
    /// oldest record is evicted to make room.
    pub fn record(&self, record: TransitionRecord<S, E>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        while records.len() > self.capacity {
            records.remove(0);
        }
        Self {
            capacity: self.capacity,
            records,
        }
    }

    /// All retained records, oldest first.
    pub fn records(&self) -> &[TransitionRecord<S, E>] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S, E>> {
        self.records.last()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the trace holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The route of target states taken, oldest first: the first record's
    /// source followed by every record's target.
    pub fn route(&self) -> Vec<&S> {
        let mut route = Vec::new();
        if let Some(first) = self.records.first() {
            route.push(&first.from);
        }
        for record in &self.records {
            route.push(&record.to);
        }
        route
    }

    /// Elapsed time between the first and last retained record.
    ///
    /// Returns `None` for an empty trace.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Running,
        Fault,
    }

    impl StateId for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Running => "Running",
                Self::Fault => "Fault",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Start,
        Trip,
    }

    impl EventId for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Trip => "Trip",
            }
        }
    }

    fn record(from: TestState, trigger: TestEvent, to: TestState) -> TransitionRecord<TestState, TestEvent> {
        TransitionRecord {
            from,
            trigger,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_trace_is_empty() {
        let trace: TransitionTrace<TestState, TestEvent> = TransitionTrace::new();
        assert!(trace.is_empty());
        assert!(trace.route().is_empty());
        assert!(trace.duration().is_none());
        assert_eq!(trace.capacity(), DEFAULT_TRACE_CAPACITY);
    }

    #[test]
    fn record_adds_and_preserves_original() {
        let trace = TransitionTrace::new();
        let new_trace = trace.record(record(TestState::Idle, TestEvent::Start, TestState::Running));

        assert_eq!(trace.len(), 0);
        assert_eq!(new_trace.len(), 1);
        assert_eq!(new_trace.last().unwrap().to, TestState::Running);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut trace = TransitionTrace::with_capacity(2);
        trace = trace.record(record(TestState::Idle, TestEvent::Start, TestState::Running));
        trace = trace.record(record(TestState::Running, TestEvent::Trip, TestState::Fault));
        trace = trace.record(record(TestState::Fault, TestEvent::Start, TestState::Idle));

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.records()[0].from, TestState::Running);
        assert_eq!(trace.last().unwrap().to, TestState::Idle);
    }

    #[test]
    fn route_follows_targets_in_order() {
        let mut trace = TransitionTrace::new();
        trace = trace.record(record(TestState::Idle, TestEvent::Start, TestState::Running));
        trace = trace.record(record(TestState::Running, TestEvent::Trip, TestState::Fault));

        let route = trace.route();
        assert_eq!(route.len(), 3);
        assert_eq!(route[0], &TestState::Idle);
        assert_eq!(route[1], &TestState::Running);
        assert_eq!(route[2], &TestState::Fault);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut trace = TransitionTrace::new();
        trace = trace.record(TransitionRecord {
            from: TestState::Idle,
            trigger: TestEvent::Start,
            to: TestState::Running,
            timestamp: start,
        });
        trace = trace.record(TransitionRecord {
            from: TestState::Running,
            trigger: TestEvent::Trip,
            to: TestState::Fault,
            timestamp: start + chrono::Duration::milliseconds(25),
        });

        assert_eq!(trace.duration().unwrap(), Duration::from_millis(25));
    }

    #[test]
    fn single_record_has_zero_duration() {
        let trace = TransitionTrace::new()
            .record(record(TestState::Idle, TestEvent::Start, TestState::Running));
        assert_eq!(trace.duration().unwrap(), Duration::from_secs(0));
    }

    #[test]
    fn trace_roundtrips_through_serde() {
        let trace = TransitionTrace::new()
            .record(record(TestState::Idle, TestEvent::Start, TestState::Running));

        let json = serde_json::to_string(&trace).unwrap();
        let deserialized: TransitionTrace<TestState, TestEvent> =
            serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), trace.len());
        assert_eq!(deserialized.capacity(), trace.capacity());
        assert_eq!(deserialized.last().unwrap().to, TestState::Running);
    }
}
