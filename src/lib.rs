//! Reflex Session: a guarded, audited session state machine for reaction games
//!
//! The crate governs the lifecycle of a single game session. Every change goes
//! through [`SessionMachine::transition`], which checks the state topology,
//! evaluates the event's guard, runs a pure action, validates invariants and
//! only then commits. Each commit is recorded as an immutable
//! [`Transaction`](core::Transaction) in a bounded log, which also backs
//! rollback and statistics.
//!
//! # Core Concepts
//!
//! - **States and events**: closed enums matched exhaustively
//! - **Guards**: pure predicates over the current session data
//! - **Actions**: pure functions producing a data delta
//! - **Invariants**: predicates every committed snapshot must satisfy
//! - **Transactions**: immutable records of committed transitions
//!
//! # Example
//!
//! ```rust
//! use reflex_session::core::{Event, EventPayload, ManualClock, SessionState};
//! use reflex_session::SessionMachineBuilder;
//!
//! let mut machine = SessionMachineBuilder::new()
//!     .clock(ManualClock::default())
//!     .build()
//!     .unwrap();
//!
//! machine.transition(Event::StartGame, None).unwrap();
//! let committed = machine.transition(Event::GameReady, None).unwrap();
//! assert_eq!(committed.new_state, SessionState::Active);
//!
//! // Pausing twice is blocked by the pause guard.
//! machine.transition(Event::PauseGame, None).unwrap();
//! assert!(machine.transition(Event::PauseGame, None).is_err());
//!
//! // Undo the pause.
//! machine.rollback(None).unwrap();
//! assert_eq!(machine.current_state(), SessionState::Active);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod invariants;

// Re-export commonly used types
pub use builder::{BuildError, SessionMachineBuilder};
pub use config::MachineConfig;
pub use core::{Event, EventPayload, SessionData, SessionState, Transaction};
pub use engine::{Committed, MachineStatistics, SessionMachine, Subscription};
pub use error::{MachineError, TransitionFailure};
pub use invariants::{InvariantViolation, ValidationMode};
