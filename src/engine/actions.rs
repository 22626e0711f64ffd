//! Actions: pure functions computing the data delta for an accepted event.
//!
//! An action never sees the target state and never touches the live record.
//! The engine merges the returned [`SessionDelta`] and stamps the state itself.

use crate::core::{Event, EventPayload, InstructionRef, SessionData, SessionDelta};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything an action may read.
#[derive(Clone, Copy, Debug)]
pub struct ActionContext<'a> {
    pub event: Event,
    pub payload: Option<&'a EventPayload>,
    pub data: &'a SessionData,
    pub now: DateTime<Utc>,
}

/// A pure action.
pub type Action = fn(&ActionContext<'_>) -> SessionDelta;

/// Action registered for `event`.
pub fn action_for(event: Event) -> Action {
    match event {
        Event::StartGame => initialize_game,
        Event::GameReady => activate_game,
        Event::PauseGame => pause_game,
        Event::ResumeGame => resume_game,
        Event::SubmitAnswer => process_answer,
        Event::EndGame | Event::TimeUp | Event::LivesExhausted | Event::GameComplete => end_game,
        Event::ResetGame | Event::RecoverFromError => reset_game,
        Event::ErrorOccurred => handle_error,
    }
}

/// Fresh counters for a new session, stamped with the start time.
pub fn initialize_game(ctx: &ActionContext<'_>) -> SessionDelta {
    let payload = ctx.payload;
    let round_time_limit = payload
        .and_then(|p| p.round_time_limit)
        .unwrap_or(ctx.data.round_time_limit);

    SessionDelta {
        game_mode: Some(
            payload
                .and_then(|p| p.game_mode)
                .unwrap_or(ctx.data.game_mode),
        ),
        level: Some(1),
        score: Some(0),
        streak: Some(0),
        mistakes: Some(0),
        total_reaction_time: Some(Duration::ZERO),
        time_remaining: Some(round_time_limit),
        round_time_limit: Some(round_time_limit),
        current_instruction: Some(None),
        is_active: Some(false),
        has_started: Some(false),
        last_fail_reason: Some(None),
        last_fail_detail: Some(None),
        last_error: Some(None),
        started_at: Some(Some(ctx.now)),
        created_at: None,
    }
}

pub fn activate_game(ctx: &ActionContext<'_>) -> SessionDelta {
    SessionDelta {
        is_active: Some(true),
        has_started: Some(true),
        time_remaining: Some(ctx.data.round_time_limit),
        current_instruction: next_instruction(ctx.payload),
        ..SessionDelta::default()
    }
}

pub fn pause_game(_ctx: &ActionContext<'_>) -> SessionDelta {
    SessionDelta {
        is_active: Some(false),
        ..SessionDelta::default()
    }
}

pub fn resume_game(_ctx: &ActionContext<'_>) -> SessionDelta {
    SessionDelta {
        is_active: Some(true),
        ..SessionDelta::default()
    }
}

/// Score a submitted answer.
///
/// A missing `is_correct` counts as a wrong answer.
pub fn process_answer(ctx: &ActionContext<'_>) -> SessionDelta {
    let data = ctx.data;
    let default_payload = EventPayload::default();
    let payload = ctx.payload.unwrap_or(&default_payload);

    let reaction = payload.reaction_time.unwrap_or(Duration::ZERO);
    let mut delta = SessionDelta {
        total_reaction_time: Some(data.total_reaction_time.saturating_add(reaction)),
        time_remaining: Some(data.round_time_limit),
        current_instruction: next_instruction(Some(payload)),
        ..SessionDelta::default()
    };

    if payload.is_correct.unwrap_or(false) {
        delta.score = Some(data.score.saturating_add(payload.score_gain.unwrap_or(0)));
        delta.streak = Some(data.streak.saturating_add(1));
        delta.level = Some(data.level.saturating_add(1));
        delta.last_fail_reason = Some(None);
        delta.last_fail_detail = Some(None);
    } else {
        delta.mistakes = Some(data.mistakes.saturating_add(1));
        delta.streak = Some(0);
        delta.last_fail_reason = Some(Some(
            payload
                .fail_reason
                .clone()
                .unwrap_or_else(|| "incorrect".to_string()),
        ));
        delta.last_fail_detail = Some(payload.fail_detail.clone());
    }

    if payload.should_end_game {
        delta.is_active = Some(false);
    }

    delta
}

/// Stop play. A TIME_UP also drains the round timer.
pub fn end_game(ctx: &ActionContext<'_>) -> SessionDelta {
    SessionDelta {
        is_active: Some(false),
        time_remaining: (ctx.event == Event::TimeUp).then_some(Duration::ZERO),
        ..SessionDelta::default()
    }
}

/// Every field back to fresh IDLE values.
pub fn reset_game(ctx: &ActionContext<'_>) -> SessionDelta {
    SessionDelta::replace_with(&SessionData::new(ctx.now))
}

pub fn handle_error(ctx: &ActionContext<'_>) -> SessionDelta {
    let message = ctx
        .payload
        .and_then(|p| p.error.clone())
        .unwrap_or_else(|| "unknown error".to_string());

    SessionDelta {
        is_active: Some(false),
        last_error: Some(Some(message)),
        ..SessionDelta::default()
    }
}

fn next_instruction(payload: Option<&EventPayload>) -> Option<Option<InstructionRef>> {
    payload
        .and_then(|p| p.instruction.clone())
        .map(Some)
}
