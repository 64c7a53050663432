//! Configuration validation.
//!
//! A machine configuration is checked exactly once, when
//! [`MachineBuilder::build`](crate::builder::MachineBuilder::build) runs.
//! After a configuration passes, no check is ever repeated: the engine
//! relies on the validated invariants (unique states, deterministic
//! transition table, single-parent forest, bounded depth) for every
//! dispatch.
//!
//! Validation accumulates every violation it finds rather than stopping at
//! the first, so one failed build reports the full set of defects.
//!
//! # Example
//!
//! ```rust
//! use strata::core::{SubstateGroup, TransitionRule};
//! use strata::validate::{validate, RawConfig};
//! use strata::{event_ids, state_ids};
//!
//! state_ids! {
//!     enum Light {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! event_ids! {
//!     enum Cycle {
//!         Next,
//!     }
//! }
//!
//! let declared = [Light::Red, Light::Green];
//! let transitions = [
//!     TransitionRule::new(Light::Red, Cycle::Next, Light::Green),
//!     TransitionRule::new(Light::Green, Cycle::Next, Light::Red),
//! ];
//! let groups: [SubstateGroup<Light>; 0] = [];
//!
//! let report = validate(&RawConfig {
//!     declared: &declared,
//!     transitions: &transitions,
//!     groups: &groups,
//!     initial: None,
//!     max_depth: 8,
//! });
//!
//! assert!(report.is_empty());
//! ```

mod rules;
mod violations;

pub use rules::{validate, RawConfig};
pub use violations::{ConfigViolation, ValidationReport};
