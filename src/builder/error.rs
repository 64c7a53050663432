//! Build errors for machine and rule builders.

use crate::validate::ValidationReport;
use thiserror::Error;

/// Errors that can occur when building machines and transition rules.
///
/// Construction is the only fallible phase: once a machine is built, event
/// dispatch and hook invocation cannot fail.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition trigger not specified. Call .trigger(event)")]
    MissingTrigger,

    #[error("Transition target not specified. Call .to(state)")]
    MissingToState,

    #[error("configuration rejected: {0}")]
    Rejected(ValidationReport),
}
