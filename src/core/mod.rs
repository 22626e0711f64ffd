//! Core session types and logic.
//!
//! This module contains the pure building blocks of the session machine:
//! - State and event sets
//! - The session data record and action deltas
//! - Guard predicates for transition control
//! - Immutable transactions and the bounded transaction log
//! - The clock abstraction
//!
//! Nothing in here mutates engine state; the engine composes these pieces.

mod clock;
mod data;
mod event;
mod guard;
mod history;
mod state;

pub(crate) use clock::elapsed;
pub use clock::{Clock, ManualClock, SystemClock};
pub use data::{
    GameMode, InstructionRef, SessionData, SessionDelta, DEFAULT_ROUND_TIME_LIMIT,
    MAX_ROUND_TIME_LIMIT,
};
pub use event::{Event, EventPayload};
pub use guard::{Guard, GuardSet};
pub use history::{Transaction, TransactionId, TransactionLog};
pub use state::SessionState;
