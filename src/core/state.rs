//! Session lifecycle states.
//!
//! The set of states is closed: every transition site matches on
//! [`SessionState`] exhaustively, so adding a state forces each table in the
//! engine to be revisited.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle position of a single game session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum SessionState {
    /// No session in progress.
    #[default]
    Idle,
    /// A session was requested and is waiting for readiness.
    Starting,
    /// Rounds are being played.
    Active,
    /// Play is suspended; counters are frozen.
    Paused,
    /// The session is winding down; no more answers are accepted.
    Ending,
    /// The session finished.
    GameOver,
    /// Something external went wrong; only recovery leads out.
    Error,
}

impl SessionState {
    /// Every state, in declaration order.
    pub const ALL: [SessionState; 7] = [
        SessionState::Idle,
        SessionState::Starting,
        SessionState::Active,
        SessionState::Paused,
        SessionState::Ending,
        SessionState::GameOver,
        SessionState::Error,
    ];

    /// Name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Starting => "Starting",
            SessionState::Active => "Active",
            SessionState::Paused => "Paused",
            SessionState::Ending => "Ending",
            SessionState::GameOver => "GameOver",
            SessionState::Error => "Error",
        }
    }

    /// A finished session; play can only resume after a reset.
    pub const fn is_final(self) -> bool {
        matches!(self, SessionState::GameOver)
    }

    pub const fn is_error(self) -> bool {
        matches!(self, SessionState::Error)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(SessionState::Idle.name(), "Idle");
        assert_eq!(SessionState::Starting.name(), "Starting");
        assert_eq!(SessionState::Active.name(), "Active");
        assert_eq!(SessionState::Paused.name(), "Paused");
        assert_eq!(SessionState::Ending.name(), "Ending");
        assert_eq!(SessionState::GameOver.name(), "GameOver");
        assert_eq!(SessionState::Error.name(), "Error");
    }

    #[test]
    fn is_final_identifies_game_over_only() {
        let finals: Vec<_> = SessionState::ALL.iter().filter(|s| s.is_final()).collect();
        assert_eq!(finals, vec![&SessionState::GameOver]);
    }

    #[test]
    fn is_error_identifies_error_state() {
        let errors: Vec<_> = SessionState::ALL.iter().filter(|s| s.is_error()).collect();
        assert_eq!(errors, vec![&SessionState::Error]);
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    #[test]
    fn state_serializes_correctly() {
        let state = SessionState::Paused;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(SessionState::GameOver.to_string(), "GameOver");
    }
}
