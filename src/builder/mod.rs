//! Builder API for machine construction.
//!
//! The builder is the crate's configuration surface: states with their
//! handlers, the transition table, substate groups, the initial state and
//! the capacity bounds all accumulate here. `build` runs the configuration
//! validator exactly once and hands a validated configuration to the
//! engine; nothing about a machine can change after that point.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::{MachineBuilder, DEFAULT_MAX_DEPTH, DEFAULT_QUEUE_CAPACITY};
pub use transition::RuleBuilder;
