//! The invariant set and its validator, accumulating with `Validation`.

use crate::core::{Event, SessionData, SessionState, MAX_ROUND_TIME_LIMIT};
use crate::error::panic_message;
use crate::invariants::context::InvariantContext;
use crate::invariants::violations::{InvariantViolation, ValidationMode};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// How far `updated_at` may run ahead of the clock.
pub const CLOCK_TOLERANCE: Duration = Duration::from_millis(1000);

/// Reaction time allowed per level.
pub const REACTION_TIME_PER_LEVEL: Duration = Duration::from_millis(10_000);

/// Type alias for invariant predicates.
///
/// `Ok(true)` means the invariant holds, `Ok(false)` that it is broken, and
/// `Err` that the check itself could not be evaluated. A check that panics is
/// treated like one that returned `Err` with the panic message.
pub type InvariantCheck =
    Box<dyn Fn(&InvariantContext<'_>) -> Result<bool, String> + Send + Sync>;

/// A named invariant.
pub struct Invariant {
    name: String,
    check: InvariantCheck,
}

impl Invariant {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&InvariantContext<'_>) -> Result<bool, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(
        &self,
        context: &InvariantContext<'_>,
        mode: ValidationMode,
    ) -> Validation<(), NonEmptyVec<InvariantViolation>> {
        let outcome = catch_unwind(AssertUnwindSafe(|| (self.check)(context)))
            .unwrap_or_else(|panic| Err(panic_message(panic.as_ref())));

        match outcome {
            Ok(true) => Validation::success(()),
            Ok(false) => Validation::fail(InvariantViolation::Broken {
                name: self.name.clone(),
            }),
            Err(cause) if mode == ValidationMode::Strict => {
                Validation::fail(InvariantViolation::Faulted {
                    name: self.name.clone(),
                    cause,
                })
            }
            Err(cause) => {
                tracing::debug!(invariant = %self.name, %cause, "ignoring faulted invariant");
                Validation::success(())
            }
        }
    }
}

impl std::fmt::Debug for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invariant").field("name", &self.name).finish()
    }
}

/// Runs every invariant against a snapshot and reports ALL failures.
///
/// Mistakes and score are unsigned, so their non-negativity holds by
/// construction and has no runtime check.
#[derive(Debug)]
pub struct InvariantValidator {
    invariants: Vec<Invariant>,
}

impl InvariantValidator {
    /// Validator with the standard session invariants.
    pub fn standard() -> Self {
        Self {
            invariants: vec![
                Invariant::new("score_monotonic", |ctx| {
                    Ok(match ctx.previous {
                        Some(prev) if !ctx.is_reset() => ctx.new.score >= prev.score,
                        _ => true,
                    })
                }),
                Invariant::new("game_over_inactive", |ctx| {
                    Ok(!ctx.new.current_state.is_final() || !ctx.new.is_active)
                }),
                Invariant::new("level_monotonic", |ctx| {
                    Ok(match (ctx.previous, ctx.event) {
                        (_, Some(Event::ResetGame)) => ctx.new.level == 1,
                        (Some(_), Some(event)) if event.is_reset() => true,
                        (Some(prev), _) => ctx.new.level >= prev.level,
                        (None, _) => true,
                    })
                }),
                Invariant::new("mistake_resets_streak", |ctx| {
                    Ok(match ctx.previous {
                        Some(prev) if ctx.new.mistakes > prev.mistakes => ctx.new.streak == 0,
                        _ => true,
                    })
                }),
                Invariant::new("time_remaining_bounded", |ctx| {
                    Ok(ctx.new.time_remaining <= ctx.new.round_time_limit)
                }),
                Invariant::new("round_time_limit_bounded", |ctx| {
                    let limit = ctx.new.round_time_limit;
                    Ok(!limit.is_zero() && limit <= MAX_ROUND_TIME_LIMIT)
                }),
                Invariant::new("reaction_time_bounded", |ctx| {
                    let bound = REACTION_TIME_PER_LEVEL
                        .checked_mul(ctx.new.level.max(1))
                        .ok_or_else(|| format!("bound overflows at level {}", ctx.new.level))?;
                    Ok(ctx.new.total_reaction_time <= bound)
                }),
                Invariant::new("active_consistency", |ctx| {
                    Ok(!ctx.new.is_active
                        || (ctx.new.has_started && ctx.new.current_state == SessionState::Active))
                }),
                Invariant::new("timestamps_ordered", |ctx| {
                    let tolerance = chrono::Duration::from_std(CLOCK_TOLERANCE)
                        .map_err(|e| e.to_string())?;
                    Ok(ctx.new.updated_at >= ctx.new.created_at
                        && ctx.new.updated_at <= ctx.now + tolerance)
                }),
            ],
        }
    }

    /// Validator with no invariants at all.
    pub fn empty() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    /// Add an invariant to the set.
    pub fn with(mut self, invariant: Invariant) -> Self {
        self.invariants.push(invariant);
        self
    }

    pub fn push(&mut self, invariant: Invariant) {
        self.invariants.push(invariant);
    }

    /// Names of the registered invariants, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.invariants.iter().map(Invariant::name)
    }

    /// Evaluate every invariant, accumulating ALL violations.
    pub fn check(
        &self,
        context: &InvariantContext<'_>,
        mode: ValidationMode,
    ) -> Validation<(), NonEmptyVec<InvariantViolation>> {
        if mode == ValidationMode::Disabled {
            return Validation::success(());
        }

        let checks: Vec<Validation<(), NonEmptyVec<InvariantViolation>>> = self
            .invariants
            .iter()
            .map(|invariant| invariant.evaluate(context, mode))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Evaluate every invariant and list the violations.
    pub fn validate(
        &self,
        context: &InvariantContext<'_>,
        mode: ValidationMode,
    ) -> Vec<InvariantViolation> {
        match self.check(context, mode) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}

impl Default for InvariantValidator {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cheap hot-path check of the invariants that can never be relaxed.
///
/// Unsigned counters cover mistakes, score, streak and time remaining, which
/// leaves the level floor.
pub fn validate_critical(data: &SessionData) -> Vec<InvariantViolation> {
    if data.level >= 1 {
        Vec::new()
    } else {
        vec![InvariantViolation::Broken {
            name: "level_at_least_one".to_string(),
        }]
    }
}
