//! Invariant validation for committed session snapshots.
//!
//! Every snapshot the engine is about to commit is run through an
//! [`InvariantValidator`]. The validator uses Stillwater's `Validation` type to
//! accumulate ALL violations instead of stopping at the first one, so a
//! rejected transition reports every invariant it broke.
//!
//! # Example
//!
//! ```rust
//! use reflex_session::core::SessionData;
//! use reflex_session::invariants::{InvariantContext, InvariantValidator, ValidationMode};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let data = SessionData::new(now);
//! let validator = InvariantValidator::standard();
//!
//! let violations = validator.validate(&InvariantContext::snapshot(&data, now), ValidationMode::Strict);
//! assert!(violations.is_empty());
//! ```

pub mod context;
pub mod rules;
pub mod violations;

pub use context::InvariantContext;
pub use rules::{
    validate_critical, Invariant, InvariantCheck, InvariantValidator, CLOCK_TOLERANCE,
    REACTION_TIME_PER_LEVEL,
};
pub use violations::{InvariantViolation, ValidationMode};
