//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the current [`SessionData`]. They
//! run after the topology check has accepted an edge and decide whether the
//! data permits the event.

use super::data::SessionData;
use super::event::Event;
use super::state::SessionState;

/// Named, pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use reflex_session::core::{Guard, SessionData, SessionState};
/// use chrono::Utc;
///
/// let in_idle = Guard::new("inIdle", |d: &SessionData| d.current_state == SessionState::Idle);
/// assert!(in_idle.check(&SessionData::new(Utc::now())));
/// ```
pub struct Guard {
    name: &'static str,
    predicate: Box<dyn Fn(&SessionData) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&SessionData) -> bool + Send + Sync + 'static,
    {
        Guard {
            name,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the guard allows a transition from this data.
    pub fn check(&self, data: &SessionData) -> bool {
        (self.predicate)(data)
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}

/// The guards registered per event.
#[derive(Debug)]
pub struct GuardSet {
    can_start_game: Guard,
    can_pause_game: Guard,
    can_resume_game: Guard,
    can_submit_answer: Guard,
    can_end_game: Guard,
}

impl GuardSet {
    pub fn new() -> Self {
        Self {
            can_start_game: Guard::new("canStartGame", |d| {
                d.current_state == SessionState::Idle && !d.is_active
            }),
            can_pause_game: Guard::new("canPauseGame", |d| {
                d.current_state == SessionState::Active && d.is_active
            }),
            can_resume_game: Guard::new("canResumeGame", |d| {
                d.current_state == SessionState::Paused && d.has_started
            }),
            // Starting is accepted so a submit can race right behind readiness.
            can_submit_answer: Guard::new("canSubmitAnswer", |d| {
                matches!(
                    d.current_state,
                    SessionState::Active | SessionState::Starting
                )
            }),
            can_end_game: Guard::new("canEndGame", |d| {
                matches!(d.current_state, SessionState::Active | SessionState::Paused)
                    && d.has_started
            }),
        }
    }

    /// Guard registered for `event`, if any.
    pub fn for_event(&self, event: Event) -> Option<&Guard> {
        match event {
            Event::StartGame => Some(&self.can_start_game),
            Event::PauseGame => Some(&self.can_pause_game),
            Event::ResumeGame => Some(&self.can_resume_game),
            Event::SubmitAnswer => Some(&self.can_submit_answer),
            Event::EndGame => Some(&self.can_end_game),
            Event::GameReady
            | Event::TimeUp
            | Event::LivesExhausted
            | Event::GameComplete
            | Event::ResetGame
            | Event::ErrorOccurred
            | Event::RecoverFromError => None,
        }
    }
}

impl Default for GuardSet {
    fn default() -> Self {
        Self::new()
    }
}
