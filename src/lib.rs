//! Strata: a hierarchical state machine engine for control loops
//!
//! Strata implements statechart semantics with bounded runtime behavior:
//! nested (composite) states, deterministic event-triggered transitions,
//! ancestor-to-descendant event bubbling and cascading default-child entry.
//! The state graph is validated once, when the machine is built; after
//! that, every dispatch is bounded by the hierarchy depth and the size of
//! the transition table, and steady-state operation performs no
//! allocation.
//!
//! # Core Concepts
//!
//! - **State ids and events**: two fixed enumerated domains per machine,
//!   declared with [`state_ids!`] and [`event_ids!`]
//! - **Handlers**: per-state `on_entry` / `on_active` / `on_exit` hooks via
//!   the [`StateHandler`] trait
//! - **Hierarchy**: parent states with a default child; entering a
//!   composite state cascades to its default descendant leaf
//! - **Update cycle**: [`Machine::send_event`] enqueues,
//!   [`Machine::update`] drains the queue FIFO and then runs `on_active`
//!   over the active path, leaf to root
//!
//! # Example
//!
//! ```rust
//! use strata::{event_ids, state_ids, MachineBuilder};
//!
//! state_ids! {
//!     enum Heater {
//!         Off,
//!         On,
//!     }
//! }
//!
//! event_ids! {
//!     enum Thermostat {
//!         TooCold,
//!         WarmEnough,
//!     }
//! }
//!
//! let mut machine = MachineBuilder::new()
//!     .state(Heater::Off, ())
//!     .state(Heater::On, ())
//!     .on(Heater::Off, Thermostat::TooCold, Heater::On)
//!     .on(Heater::On, Thermostat::WarmEnough, Heater::Off)
//!     .build()
//!     .unwrap();
//!
//! machine.send_event(Thermostat::TooCold);
//! machine.update();
//! assert_eq!(machine.current_state(), Heater::On);
//! ```

pub mod bounded;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod validate;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, RuleBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{
    Action, EventId, StateHandler, StateId, SubstateGroup, TransitionRecord, TransitionRule,
    TransitionTrace,
};
pub use crate::engine::Machine;
pub use crate::validate::{ConfigViolation, ValidationReport};
