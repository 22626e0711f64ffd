//! Invariant violations and validation modes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("invariant '{name}' violated")]
    Broken { name: String },

    #[error("invariant '{name}' faulted: {cause}")]
    Faulted { name: String, cause: String },
}

impl InvariantViolation {
    /// Name of the invariant that failed.
    pub fn name(&self) -> &str {
        match self {
            Self::Broken { name } | Self::Faulted { name, .. } => name,
        }
    }
}

/// How invariant failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Any violation aborts the transition. Faulting checks count as
    /// violations.
    #[default]
    Strict,

    /// Violations are reported as warnings and the transition commits.
    /// Faulting checks are ignored.
    Lenient,

    /// Invariants are not evaluated.
    Disabled,
}
