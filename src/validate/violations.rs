//! Configuration violations and the report that collects them.

use std::fmt;
use thiserror::Error;

/// A single defect found in a machine configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("no states declared")]
    NoStates,

    #[error("state '{state}' declared more than once")]
    DuplicateState { state: String },

    #[error("no transitions declared")]
    NoTransitions,

    #[error("{context} references undeclared state '{state}'")]
    UnknownState { context: String, state: String },

    #[error("transition from '{state}' targets itself")]
    SelfTransition { state: String },

    #[error("more than one transition from '{from}' on '{trigger}'")]
    DuplicateTransition { from: String, trigger: String },

    #[error("group parent '{parent}' appears among its own children")]
    ParentAmongChildren { parent: String },

    #[error("state '{state}' appears more than once as a child of '{parent}'")]
    DuplicateChild { parent: String, state: String },

    #[error("state '{parent}' declared as a parent in more than one group")]
    DuplicateGroup { parent: String },

    #[error("state '{child}' has more than one parent")]
    MultipleParents { child: String },

    #[error("state '{state}' is its own ancestor")]
    HierarchyCycle { state: String },

    #[error("hierarchy depth {depth} exceeds the configured maximum of {max}")]
    DepthExceeded { depth: usize, max: usize },
}

/// Every violation found in one validation pass.
///
/// Validation does not stop at the first defect: the whole configuration
/// is checked and all findings are reported together, so a rejected build
/// can be fixed in one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<ConfigViolation>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation to the report.
    pub fn push(&mut self, violation: ConfigViolation) {
        self.violations.push(violation);
    }

    /// Check whether the configuration passed (no violations found).
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations found.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// The violations, in the order the checks found them.
    pub fn violations(&self) -> &[ConfigViolation] {
        &self.violations
    }

    /// Check whether the report contains `violation`.
    pub fn contains(&self, violation: &ConfigViolation) -> bool {
        self.violations.contains(violation)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}
