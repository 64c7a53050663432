//! The machine runtime: active path, event queue and dispatch.

use crate::bounded::{BoundedQueue, BoundedVec};
use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{
    EventId, Hierarchy, Registry, StateId, TransitionRecord, TransitionRule, TransitionTrace,
};
use chrono::Utc;
use uuid::Uuid;

/// Capacity bounds fixed by the builder.
pub(crate) struct Capacities {
    pub max_depth: usize,
    pub queue_capacity: usize,
    pub trace_capacity: usize,
}

/// A running hierarchical state machine.
///
/// Built by [`MachineBuilder`](crate::builder::MachineBuilder) from a
/// validated configuration. The machine owns the active-state path (the
/// root-to-leaf chain of currently active states) and the pending-event
/// queue; both are capacity-bounded, so steady-state operation allocates
/// nothing.
///
/// The intended use is a cooperative control loop: feed events with
/// [`send_event`](Self::send_event), then call [`update`](Self::update)
/// once per cycle. `update` drains the queue in FIFO order - each event is
/// dispatched to completion before the next is popped - and then runs
/// `on_active` over the active path, leaf to root. Dropping the machine
/// exits the active path, leaf to root.
///
/// The API is `&mut self` throughout and performs no internal locking;
/// callers that feed events from another execution context wrap the
/// machine in their own synchronization. Hooks and transition actions must
/// not call back into the same machine instance mid-dispatch.
pub struct Machine<S: StateId, E: EventId> {
    registry: Registry<S>,
    transitions: Vec<TransitionRule<S, E>>,
    hierarchy: Hierarchy<S>,
    initial: S,
    active: BoundedVec<S>,
    scratch: BoundedVec<S>,
    visited: BoundedVec<S>,
    queue: BoundedQueue<E>,
    trace: TransitionTrace<S, E>,
}

impl<S: StateId, E: EventId> Machine<S, E> {
    /// Construct the machine from validated parts and run the initial
    /// entry cascade.
    pub(crate) fn assemble(
        registry: Registry<S>,
        transitions: Vec<TransitionRule<S, E>>,
        hierarchy: Hierarchy<S>,
        initial: S,
        capacities: Capacities,
    ) -> Self {
        let mut active = BoundedVec::with_capacity(capacities.max_depth);
        hierarchy.path_to_root(initial, &mut active);
        hierarchy.cascade(&mut active);

        let mut machine = Self {
            registry,
            transitions,
            hierarchy,
            initial,
            active,
            scratch: BoundedVec::with_capacity(capacities.max_depth),
            visited: BoundedVec::with_capacity(capacities.max_depth),
            queue: BoundedQueue::with_capacity(capacities.queue_capacity),
            trace: TransitionTrace::with_capacity(capacities.trace_capacity),
        };

        for index in 0..machine.active.len() {
            let id = machine.active.as_slice()[index];
            machine.registry.handler_mut(id).on_entry();
        }

        machine
    }

    /// Enqueue an event for the next [`update`](Self::update).
    ///
    /// Never dispatches synchronously and never blocks. Returns `false`
    /// (and drops the event) when the queue is full.
    pub fn send_event(&mut self, event: E) -> bool {
        self.queue.push(event)
    }

    /// Run one cycle: drain the event queue, then run `on_active` hooks.
    ///
    /// Events are dispatched in FIFO order, each to completion before the
    /// next is popped. Only after the queue is fully drained does
    /// `on_active` run over the active path, leaf to root; each call
    /// receives the active states already visited in this pass, leaf-most
    /// first.
    pub fn update(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.dispatch(event);
        }

        self.visited.clear();
        for index in (0..self.active.len()).rev() {
            let id = self.active.as_slice()[index];
            self.registry
                .handler_mut(id)
                .on_active(self.visited.as_slice());
            self.visited.push(id);
        }
    }

    /// The currently active leaf state.
    pub fn current_state(&self) -> S {
        *self
            .active
            .last()
            .expect("active path is never empty after construction")
    }

    /// The active path, root-most first, leaf-most last.
    pub fn current_path(&self) -> &[S] {
        self.active.as_slice()
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// The configured initial state.
    pub fn initial_state(&self) -> S {
        self.initial
    }

    /// The bounded trace of fired transitions.
    pub fn trace(&self) -> &TransitionTrace<S, E> {
        &self.trace
    }

    /// Capture a restorable snapshot of the machine's runtime state.
    ///
    /// Handlers and actions are code, not data; they are never captured.
    /// The snapshot carries the active path, pending events and trace.
    pub fn checkpoint(&self) -> Checkpoint<S, E> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial,
            active_path: self.active.iter().copied().collect(),
            pending_events: self.queue.iter().copied().collect(),
            trace: self.trace.clone(),
        }
    }

    /// Replace the machine's runtime state with a snapshot.
    ///
    /// The snapshot is checked against this machine's own configuration
    /// before anything is touched, so a failed restore leaves the machine
    /// unchanged. On success the current path is exited leaf to root and
    /// the restored path entered root to leaf - entry hooks re-establish
    /// handler state, exactly as on construction.
    pub fn restore(&mut self, checkpoint: &Checkpoint<S, E>) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        self.check_restorable(checkpoint)?;

        for index in (0..self.active.len()).rev() {
            let id = self.active.as_slice()[index];
            self.registry.handler_mut(id).on_exit();
        }

        self.active.clear();
        for &state in &checkpoint.active_path {
            self.active.push(state);
            self.registry.handler_mut(state).on_entry();
        }

        self.queue.clear();
        for &event in &checkpoint.pending_events {
            self.queue.push(event);
        }
        self.trace = checkpoint.trace.clone();

        Ok(())
    }

    fn check_restorable(&self, checkpoint: &Checkpoint<S, E>) -> Result<(), CheckpointError> {
        let path = &checkpoint.active_path;

        let Some((&root, rest)) = path.split_first() else {
            return Err(CheckpointError::ValidationFailed(
                "active path is empty".to_string(),
            ));
        };
        if path.len() > self.active.capacity() {
            return Err(CheckpointError::ValidationFailed(format!(
                "active path depth {} exceeds the configured maximum {}",
                path.len(),
                self.active.capacity()
            )));
        }
        for &state in path {
            if !self.registry.contains(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "undeclared state '{}' in active path",
                    state.name()
                )));
            }
        }
        if self.hierarchy.find_parent(root).is_some() {
            return Err(CheckpointError::ValidationFailed(format!(
                "active path does not start at a root: '{}'",
                root.name()
            )));
        }
        let mut parent = root;
        for &child in rest {
            if self.hierarchy.find_parent(child) != Some(parent) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "'{}' is not a child of '{}'",
                    child.name(),
                    parent.name()
                )));
            }
            parent = child;
        }
        if !self.hierarchy.is_leaf(parent) {
            return Err(CheckpointError::ValidationFailed(format!(
                "active path does not end at a leaf: '{}'",
                parent.name()
            )));
        }
        if checkpoint.pending_events.len() > self.queue.capacity() {
            return Err(CheckpointError::ValidationFailed(format!(
                "{} pending events exceed the queue capacity {}",
                checkpoint.pending_events.len(),
                self.queue.capacity()
            )));
        }
        Ok(())
    }

    /// Dispatch one event: search for a rule from the current leaf,
    /// bubbling toward the root. At most one rule fires per event; an
    /// event with no matching rule anywhere on the chain is dropped
    /// silently.
    fn dispatch(&mut self, event: E) {
        let Some(&leaf) = self.active.last() else {
            return;
        };

        let mut candidate = leaf;
        loop {
            let matched = self
                .transitions
                .iter()
                .position(|rule| rule.matches(candidate, event));

            if let Some(index) = matched {
                let from = self.transitions[index].from;
                let to = self.transitions[index].to;
                if let Some(action) = &self.transitions[index].action {
                    action.call(from, event, to);
                }
                self.change_state(to);
                self.trace = self.trace.record(TransitionRecord {
                    from,
                    trigger: event,
                    to,
                    timestamp: Utc::now(),
                });
                return;
            }

            match self.hierarchy.find_parent(candidate) {
                Some(parent) => candidate = parent,
                None => return,
            }
        }
    }

    /// Execute a state change toward `target`: cascade the target path to
    /// a leaf, exit everything below the common prefix (leaf to root),
    /// enter the new suffix (ancestors first), then swap in the new path.
    fn change_state(&mut self, target: S) {
        self.hierarchy.path_to_root(target, &mut self.scratch);
        self.hierarchy.cascade(&mut self.scratch);

        let shared = common_prefix(self.active.as_slice(), self.scratch.as_slice());

        for index in (shared..self.active.len()).rev() {
            let id = self.active.as_slice()[index];
            self.registry.handler_mut(id).on_exit();
        }
        for index in shared..self.scratch.len() {
            let id = self.scratch.as_slice()[index];
            self.registry.handler_mut(id).on_entry();
        }

        std::mem::swap(&mut self.active, &mut self.scratch);
    }
}

impl<S: StateId, E: EventId> Drop for Machine<S, E> {
    fn drop(&mut self) {
        for index in (0..self.active.len()).rev() {
            let id = self.active.as_slice()[index];
            self.registry.handler_mut(id).on_exit();
        }
    }
}

/// Length of the longest common prefix of two paths - the point of
/// divergence used to decide which states are exited and entered.
fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
