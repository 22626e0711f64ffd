//! Events that drive the session machine and the payload they may carry.

use super::data::{GameMode, InstructionRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Every event the session machine understands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    StartGame,
    GameReady,
    SubmitAnswer,
    PauseGame,
    ResumeGame,
    TimeUp,
    LivesExhausted,
    EndGame,
    GameComplete,
    ResetGame,
    ErrorOccurred,
    RecoverFromError,
}

impl Event {
    /// Wire-style tag, e.g. `START_GAME`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::StartGame => "START_GAME",
            Self::GameReady => "GAME_READY",
            Self::SubmitAnswer => "SUBMIT_ANSWER",
            Self::PauseGame => "PAUSE_GAME",
            Self::ResumeGame => "RESUME_GAME",
            Self::TimeUp => "TIME_UP",
            Self::LivesExhausted => "LIVES_EXHAUSTED",
            Self::EndGame => "END_GAME",
            Self::GameComplete => "GAME_COMPLETE",
            Self::ResetGame => "RESET_GAME",
            Self::ErrorOccurred => "ERROR_OCCURRED",
            Self::RecoverFromError => "RECOVER_FROM_ERROR",
        }
    }

    /// Events that throw away session progress. Score and level may drop
    /// across these.
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::ResetGame | Self::RecoverFromError)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Optional data attached to an event.
///
/// Only the fields relevant to the event are read; the rest are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    /// START_GAME: mode for the new session.
    pub game_mode: Option<GameMode>,
    /// START_GAME: per-round time limit.
    pub round_time_limit: Option<Duration>,
    /// SUBMIT_ANSWER: whether the answer matched the instruction.
    pub is_correct: Option<bool>,
    /// SUBMIT_ANSWER: points awarded for a correct answer.
    pub score_gain: Option<u64>,
    /// SUBMIT_ANSWER: time taken to answer.
    pub reaction_time: Option<Duration>,
    /// SUBMIT_ANSWER: the caller decided this answer ends the session.
    pub should_end_game: bool,
    /// SUBMIT_ANSWER: why an answer was wrong.
    pub fail_reason: Option<String>,
    /// SUBMIT_ANSWER: free-form detail about a wrong answer.
    pub fail_detail: Option<String>,
    /// GAME_READY / SUBMIT_ANSWER: instruction for the next round.
    pub instruction: Option<InstructionRef>,
    /// ERROR_OCCURRED: error description.
    pub error: Option<String>,
}

impl EventPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload for a correct answer worth `score_gain` points.
    pub fn correct(score_gain: u64) -> Self {
        Self {
            is_correct: Some(true),
            score_gain: Some(score_gain),
            ..Self::default()
        }
    }

    /// Payload for an incorrect answer.
    pub fn incorrect() -> Self {
        Self {
            is_correct: Some(false),
            ..Self::default()
        }
    }

    /// Payload for ERROR_OCCURRED.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn game_mode(mut self, mode: GameMode) -> Self {
        self.game_mode = Some(mode);
        self
    }

    pub fn round_time_limit(mut self, limit: Duration) -> Self {
        self.round_time_limit = Some(limit);
        self
    }

    pub fn reaction_time(mut self, time: Duration) -> Self {
        self.reaction_time = Some(time);
        self
    }

    pub fn end_game(mut self) -> Self {
        self.should_end_game = true;
        self
    }

    pub fn fail(mut self, reason: impl Into<String>, detail: impl Into<String>) -> Self {
        self.fail_reason = Some(reason.into());
        self.fail_detail = Some(detail.into());
        self
    }

    pub fn instruction(mut self, instruction: InstructionRef) -> Self {
        self.instruction = Some(instruction);
        self
    }
}
