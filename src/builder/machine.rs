//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{
    EventId, Hierarchy, Registry, StateHandler, StateId, SubstateGroup, TransitionRule,
    DEFAULT_TRACE_CAPACITY,
};
use crate::engine::{Capacities, Machine};
use crate::validate::{validate, RawConfig};

/// Default bound on hierarchy depth (sizes the active-path storage).
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Default capacity of the pending-event queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Builder for constructing machines with a fluent API.
///
/// Declarations accumulate in call order; `build` validates the whole
/// configuration in one pass and, on success, constructs the machine and
/// runs the initial entry cascade.
///
/// # Example
///
/// ```rust
/// use strata::builder::MachineBuilder;
/// use strata::{event_ids, state_ids};
///
/// state_ids! {
///     enum Motor {
///         Stopped,
///         Spinning,
///     }
/// }
///
/// event_ids! {
///     enum Cmd {
///         Start,
///         Stop,
///     }
/// }
///
/// let mut machine = MachineBuilder::new()
///     .state(Motor::Stopped, ())
///     .state(Motor::Spinning, ())
///     .on(Motor::Stopped, Cmd::Start, Motor::Spinning)
///     .on(Motor::Spinning, Cmd::Stop, Motor::Stopped)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), Motor::Stopped);
/// machine.send_event(Cmd::Start);
/// machine.update();
/// assert_eq!(machine.current_state(), Motor::Spinning);
/// ```
pub struct MachineBuilder<S: StateId, E: EventId> {
    states: Vec<(S, Box<dyn StateHandler<S>>)>,
    transitions: Vec<TransitionRule<S, E>>,
    groups: Vec<SubstateGroup<S>>,
    initial: Option<S>,
    max_depth: usize,
    queue_capacity: usize,
    trace_capacity: usize,
}

impl<S: StateId, E: EventId> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            groups: Vec::new(),
            initial: None,
            max_depth: DEFAULT_MAX_DEPTH,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }

    /// Declare a state and bind its handler.
    ///
    /// Declaration order matters: the first declared state is the default
    /// initial state when [`initial`](Self::initial) is not called.
    pub fn state(mut self, id: S, handler: impl StateHandler<S> + 'static) -> Self {
        self.states.push((id, Box::new(handler)));
        self
    }

    /// Declare a transition with no action.
    pub fn on(mut self, from: S, trigger: E, to: S) -> Self {
        self.transitions.push(TransitionRule::new(from, trigger, to));
        self
    }

    /// Declare a transition with an action callback.
    pub fn on_with<F>(mut self, from: S, trigger: E, to: S, action: F) -> Self
    where
        F: Fn(S, E, S) + Send + Sync + 'static,
    {
        self.transitions
            .push(TransitionRule::new(from, trigger, to).with_action(action));
        self
    }

    /// Add a pre-built transition rule.
    pub fn rule(mut self, rule: TransitionRule<S, E>) -> Self {
        self.transitions.push(rule);
        self
    }

    /// Add multiple pre-built transition rules at once.
    pub fn rules(mut self, rules: impl IntoIterator<Item = TransitionRule<S, E>>) -> Self {
        self.transitions.extend(rules);
        self
    }

    /// Declare a substate group: `parent` contains `default_child` plus
    /// `other_children`.
    pub fn group(
        mut self,
        parent: S,
        default_child: S,
        other_children: impl IntoIterator<Item = S>,
    ) -> Self {
        self.groups
            .push(SubstateGroup::new(parent, default_child, other_children));
        self
    }

    /// Set the initial state (optional; defaults to the first declared
    /// state).
    pub fn initial(mut self, id: S) -> Self {
        self.initial = Some(id);
        self
    }

    /// Bound the hierarchy depth. Sizes the active-path storage; a deeper
    /// configuration is rejected at build time.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the capacity of the pending-event queue.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set how many transition records the trace retains.
    pub fn trace_capacity(mut self, capacity: usize) -> Self {
        self.trace_capacity = capacity;
        self
    }

    /// Validate the configuration and construct the machine.
    ///
    /// On success the machine's active path is seeded from the initial
    /// state, cascaded through default children to a leaf, and `on_entry`
    /// has run root to leaf. Any configuration defect aborts with
    /// [`BuildError::Rejected`] carrying the full violation report.
    pub fn build(self) -> Result<Machine<S, E>, BuildError> {
        let declared: Vec<S> = self.states.iter().map(|entry| entry.0).collect();

        let report = validate(&RawConfig {
            declared: &declared,
            transitions: &self.transitions,
            groups: &self.groups,
            initial: self.initial,
            max_depth: self.max_depth,
        });
        if !report.is_empty() {
            return Err(BuildError::Rejected(report));
        }

        // Validation guarantees at least one declared state.
        let initial = self.initial.unwrap_or(declared[0]);
        let registry = Registry::from_entries(self.states);
        let hierarchy = Hierarchy::new(self.groups);

        Ok(Machine::assemble(
            registry,
            self.transitions,
            hierarchy,
            initial,
            Capacities {
                max_depth: self.max_depth,
                queue_capacity: self.queue_capacity,
                trace_capacity: self.trace_capacity,
            },
        ))
    }
}

impl<S: StateId, E: EventId> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ConfigViolation;
    use serde::{Deserialize, Serialize};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum Sys {
        Operational,
        Idle,
        Running,
    }

    impl StateId for Sys {
        fn name(&self) -> &str {
            match self {
                Self::Operational => "Operational",
                Self::Idle => "Idle",
                Self::Running => "Running",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum Ev {
        Start,
        Stop,
    }

    impl EventId for Ev {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Stop => "Stop",
            }
        }
    }

    #[derive(Clone)]
    struct Probe {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl StateHandler<Sys> for Probe {
        fn on_entry(&mut self) {
            self.log.lock().unwrap().push(format!("enter {}", self.tag));
        }

        fn on_exit(&mut self) {
            self.log.lock().unwrap().push(format!("exit {}", self.tag));
        }
    }

    #[test]
    fn build_requires_states_and_transitions() {
        let result = MachineBuilder::<Sys, Ev>::new().build();

        match result {
            Err(BuildError::Rejected(report)) => {
                assert!(report.contains(&ConfigViolation::NoStates));
                assert!(report.contains(&ConfigViolation::NoTransitions));
            }
            _ => panic!("expected rejection"),
        }
    }

    #[test]
    fn duplicate_from_trigger_pair_fails_the_build() {
        let result = MachineBuilder::new()
            .state(Sys::Idle, ())
            .state(Sys::Running, ())
            .on(Sys::Idle, Ev::Start, Sys::Running)
            .on(Sys::Idle, Ev::Start, Sys::Running)
            .build();

        match result {
            Err(BuildError::Rejected(report)) => {
                assert!(report.contains(&ConfigViolation::DuplicateTransition {
                    from: "Idle".to_string(),
                    trigger: "Start".to_string(),
                }));
            }
            _ => panic!("expected rejection"),
        }
    }

    #[test]
    fn initial_defaults_to_first_declared_state() {
        let machine = MachineBuilder::new()
            .state(Sys::Idle, ())
            .state(Sys::Running, ())
            .on(Sys::Idle, Ev::Start, Sys::Running)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), Sys::Idle);
    }

    #[test]
    fn explicit_initial_overrides_declaration_order() {
        let machine = MachineBuilder::new()
            .state(Sys::Idle, ())
            .state(Sys::Running, ())
            .on(Sys::Running, Ev::Stop, Sys::Idle)
            .initial(Sys::Running)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), Sys::Running);
    }

    #[test]
    fn build_enters_the_initial_path_root_to_leaf() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let probe = |tag| Probe {
            tag,
            log: Arc::clone(&log),
        };

        let machine = MachineBuilder::new()
            .state(Sys::Operational, probe("Operational"))
            .state(Sys::Idle, probe("Idle"))
            .state(Sys::Running, probe("Running"))
            .group(Sys::Operational, Sys::Idle, [Sys::Running])
            .on(Sys::Idle, Ev::Start, Sys::Running)
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), Sys::Idle);
        assert_eq!(
            machine.current_path(),
            &[Sys::Operational, Sys::Idle]
        );
        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter Operational".to_string(), "enter Idle".to_string()]
        );
    }

    #[test]
    fn rules_can_be_prebuilt() {
        let rules = vec![
            TransitionRule::new(Sys::Idle, Ev::Start, Sys::Running),
            TransitionRule::new(Sys::Running, Ev::Stop, Sys::Idle),
        ];

        let machine = MachineBuilder::new()
            .state(Sys::Idle, ())
            .state(Sys::Running, ())
            .rules(rules)
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn depth_bound_is_enforced_at_build_time() {
        let result = MachineBuilder::new()
            .state(Sys::Operational, ())
            .state(Sys::Idle, ())
            .state(Sys::Running, ())
            .group(Sys::Operational, Sys::Idle, [])
            .group(Sys::Idle, Sys::Running, [])
            .on(Sys::Running, Ev::Stop, Sys::Operational)
            .max_depth(2)
            .build();

        match result {
            Err(BuildError::Rejected(report)) => {
                assert!(report.contains(&ConfigViolation::DepthExceeded { depth: 3, max: 2 }));
            }
            _ => panic!("expected rejection"),
        }
    }
}
