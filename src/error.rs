//! Errors surfaced by the session machine.

use crate::core::{Event, SessionData, SessionState, TransactionId};
use crate::invariants::InvariantViolation;
use std::any::Any;
use thiserror::Error;

/// Expected failure conditions of machine operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Transition rejected: {event} cannot move '{from}' to '{to}'")]
    TransitionRejected {
        event: Event,
        from: SessionState,
        to: SessionState,
    },

    #[error("Guard '{guard}' blocked {event} in state '{state}'")]
    GuardFailed {
        guard: &'static str,
        event: Event,
        state: SessionState,
    },

    #[error("Invariants violated by {event}: {}", names.join(", "))]
    InvariantViolation {
        event: Event,
        names: Vec<String>,
        violations: Vec<InvariantViolation>,
    },

    #[error("No transaction {} in the log", rollback_target(id))]
    RollbackNotFound { id: Option<TransactionId> },

    #[error("Rollback is disabled")]
    RollbackDisabled,

    #[error("Listener {listener} failed: {message}")]
    ListenerFault { listener: u64, message: String },
}

/// A transition that did not commit.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct TransitionFailure {
    pub error: MachineError,
    /// Last committed snapshot, set when invariants aborted the transition
    pub rollback_data: Option<SessionData>,
}

impl TransitionFailure {
    pub(crate) fn new(error: MachineError) -> Self {
        Self {
            error,
            rollback_data: None,
        }
    }
}

impl From<MachineError> for TransitionFailure {
    fn from(error: MachineError) -> Self {
        Self::new(error)
    }
}

fn rollback_target(id: &Option<TransactionId>) -> String {
    id.map_or_else(|| "recorded".to_string(), |id| id.to_string())
}

/// Readable message from a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}
