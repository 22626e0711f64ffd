//! Session data record and the deltas actions produce.
//!
//! [`SessionData`] is owned by the machine. Callers only ever see clones of
//! it, and the only way to change the live record is a committed transition.

use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Round time limit used for fresh sessions.
pub const DEFAULT_ROUND_TIME_LIMIT: Duration = Duration::from_millis(3000);

/// Upper bound accepted for a round time limit.
pub const MAX_ROUND_TIME_LIMIT: Duration = Duration::from_millis(10_000);

/// Game mode. Mode-specific rules (allowed mistakes, timing) are resolved by
/// the caller, not by the machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    Classic,
    SuddenDeath,
    Duel,
}

/// Opaque reference to an instruction produced by an external generator.
///
/// The machine never looks inside; it only stores and compares the identity.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct InstructionRef(pub String);

impl InstructionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Progress and timing of one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub current_state: SessionState,
    pub game_mode: GameMode,
    pub level: u32,
    pub score: u64,
    pub streak: u32,
    pub mistakes: u32,
    pub total_reaction_time: Duration,
    pub time_remaining: Duration,
    pub round_time_limit: Duration,
    pub current_instruction: Option<InstructionRef>,
    pub is_active: bool,
    pub has_started: bool,
    pub last_fail_reason: Option<String>,
    pub last_fail_detail: Option<String>,
    pub last_error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionData {
    /// Fresh IDLE record stamped at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_state: SessionState::Idle,
            game_mode: GameMode::default(),
            level: 1,
            score: 0,
            streak: 0,
            mistakes: 0,
            total_reaction_time: Duration::ZERO,
            time_remaining: DEFAULT_ROUND_TIME_LIMIT,
            round_time_limit: DEFAULT_ROUND_TIME_LIMIT,
            current_instruction: None,
            is_active: false,
            has_started: false,
            last_fail_reason: None,
            last_fail_detail: None,
            last_error: None,
            started_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a delta, returning the merged record. `self` is left untouched.
    pub fn merged(&self, delta: SessionDelta) -> Self {
        let mut next = self.clone();
        if let Some(v) = delta.game_mode {
            next.game_mode = v;
        }
        if let Some(v) = delta.level {
            next.level = v;
        }
        if let Some(v) = delta.score {
            next.score = v;
        }
        if let Some(v) = delta.streak {
            next.streak = v;
        }
        if let Some(v) = delta.mistakes {
            next.mistakes = v;
        }
        if let Some(v) = delta.total_reaction_time {
            next.total_reaction_time = v;
        }
        if let Some(v) = delta.time_remaining {
            next.time_remaining = v;
        }
        if let Some(v) = delta.round_time_limit {
            next.round_time_limit = v;
        }
        if let Some(v) = delta.current_instruction {
            next.current_instruction = v;
        }
        if let Some(v) = delta.is_active {
            next.is_active = v;
        }
        if let Some(v) = delta.has_started {
            next.has_started = v;
        }
        if let Some(v) = delta.last_fail_reason {
            next.last_fail_reason = v;
        }
        if let Some(v) = delta.last_fail_detail {
            next.last_fail_detail = v;
        }
        if let Some(v) = delta.last_error {
            next.last_error = v;
        }
        if let Some(v) = delta.started_at {
            next.started_at = v;
        }
        if let Some(v) = delta.created_at {
            next.created_at = v;
        }
        next
    }
}

/// Partial update produced by an action.
///
/// `None` leaves a field alone. For optional fields the inner `Option` is the
/// new value, so `Some(None)` clears the field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionDelta {
    pub game_mode: Option<GameMode>,
    pub level: Option<u32>,
    pub score: Option<u64>,
    pub streak: Option<u32>,
    pub mistakes: Option<u32>,
    pub total_reaction_time: Option<Duration>,
    pub time_remaining: Option<Duration>,
    pub round_time_limit: Option<Duration>,
    pub current_instruction: Option<Option<InstructionRef>>,
    pub is_active: Option<bool>,
    pub has_started: Option<bool>,
    pub last_fail_reason: Option<Option<String>>,
    pub last_fail_detail: Option<Option<String>>,
    pub last_error: Option<Option<String>>,
    pub started_at: Option<Option<DateTime<Utc>>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionDelta {
    /// Delta that rewrites every field to the values of `data`.
    pub fn replace_with(data: &SessionData) -> Self {
        Self {
            game_mode: Some(data.game_mode),
            level: Some(data.level),
            score: Some(data.score),
            streak: Some(data.streak),
            mistakes: Some(data.mistakes),
            total_reaction_time: Some(data.total_reaction_time),
            time_remaining: Some(data.time_remaining),
            round_time_limit: Some(data.round_time_limit),
            current_instruction: Some(data.current_instruction.clone()),
            is_active: Some(data.is_active),
            has_started: Some(data.has_started),
            last_fail_reason: Some(data.last_fail_reason.clone()),
            last_fail_detail: Some(data.last_fail_detail.clone()),
            last_error: Some(data.last_error.clone()),
            started_at: Some(data.started_at),
            created_at: Some(data.created_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
