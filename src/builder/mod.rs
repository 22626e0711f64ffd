//! Construction API for session machines.
//!
//! This module provides the fluent [`SessionMachineBuilder`], which wires a
//! configuration, a clock, extra invariants and a listener fault hook into a
//! [`SessionMachine`](crate::SessionMachine).

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::SessionMachineBuilder;
