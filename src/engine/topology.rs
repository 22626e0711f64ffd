//! Static state topology: which state an event targets and which edges exist.

use crate::core::{Event, EventPayload, SessionState};

/// Target state for `event`, taking payload overrides into account.
pub fn resolve_target(event: Event, payload: Option<&EventPayload>) -> SessionState {
    match event {
        Event::SubmitAnswer if payload.is_some_and(|p| p.should_end_game) => SessionState::Ending,
        Event::SubmitAnswer => SessionState::Active,
        Event::TimeUp | Event::LivesExhausted => SessionState::Ending,
        Event::ResetGame => SessionState::Idle,
        Event::StartGame => SessionState::Starting,
        Event::GameReady => SessionState::Active,
        Event::PauseGame => SessionState::Paused,
        Event::ResumeGame => SessionState::Active,
        Event::EndGame => SessionState::Ending,
        Event::GameComplete => SessionState::GameOver,
        Event::ErrorOccurred => SessionState::Error,
        Event::RecoverFromError => SessionState::Idle,
    }
}

/// Adjacency table: states reachable from `from` in one step.
pub fn allowed_targets(from: SessionState) -> &'static [SessionState] {
    use SessionState::*;
    match from {
        Idle => &[Starting, Error],
        Starting => &[Active, Ending, Idle, Error],
        Active => &[Paused, Ending, GameOver, Error],
        Paused => &[Active, Ending, Error],
        Ending => &[GameOver, Error],
        GameOver => &[Idle, Error],
        Error => &[Idle],
    }
}

/// Whether the topology allows `event` to move `from` to `to`.
pub fn is_allowed(event: Event, from: SessionState, to: SessionState) -> bool {
    if from == to {
        return true;
    }
    if event == Event::ResetGame && to == SessionState::Idle {
        return true;
    }
    allowed_targets(from).contains(&to)
}
