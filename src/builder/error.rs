//! Errors raised while constructing a session machine.

use crate::config::ConfigError;
use crate::invariants::InvariantViolation;
use thiserror::Error;

/// Errors that can occur when building a session machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Initial snapshot breaks invariants: {}", names(violations))]
    InvalidInitialSnapshot { violations: Vec<InvariantViolation> },
}

fn names(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(InvariantViolation::name)
        .collect::<Vec<_>>()
        .join(", ")
}
