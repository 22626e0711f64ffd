//! Context provided to invariant checks.

use crate::core::{Event, SessionData};
use chrono::{DateTime, Utc};

/// What an invariant gets to look at.
///
/// `previous` and `event` are absent when the current snapshot is validated
/// on its own (for example by `validate_current_state`); relative invariants
/// treat that as "nothing to compare against".
#[derive(Clone, Copy, Debug)]
pub struct InvariantContext<'a> {
    pub new: &'a SessionData,
    pub previous: Option<&'a SessionData>,
    pub event: Option<Event>,
    pub now: DateTime<Utc>,
}

impl<'a> InvariantContext<'a> {
    /// Context for a standalone snapshot.
    pub fn snapshot(data: &'a SessionData, now: DateTime<Utc>) -> Self {
        Self {
            new: data,
            previous: None,
            event: None,
            now,
        }
    }

    /// Context for a snapshot produced by `event` from `previous`.
    pub fn transition(
        new: &'a SessionData,
        previous: &'a SessionData,
        event: Event,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            new,
            previous: Some(previous),
            event: Some(event),
            now,
        }
    }

    /// True when the triggering event discards session progress.
    pub fn is_reset(&self) -> bool {
        self.event.is_some_and(|e| e.is_reset())
    }
}
