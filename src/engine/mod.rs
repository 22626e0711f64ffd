//! The imperative shell around the pure core.
//!
//! [`SessionMachine`] composes topology, guards, actions and invariants into
//! committed transitions, keeps the transaction log, performs rollbacks and
//! notifies listeners.
//!
//! # Key Concepts
//!
//! - **Topology**: static event→state and adjacency tables
//! - **Actions**: pure functions producing a [`SessionDelta`](crate::core::SessionDelta)
//! - **Listeners**: synchronous observers of every commit
//! - **Statistics**: metrics computed from the log on demand

pub mod actions;
mod listeners;
mod machine;
mod stats;
pub mod topology;

pub use listeners::{Listener, ListenerId, ListenerRegistry, Subscription};
pub use machine::{Committed, DiagnosticHook, SessionMachine};
pub use stats::MachineStatistics;
