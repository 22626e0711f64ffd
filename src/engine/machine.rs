//! The session machine: transition engine, rollback manager and read API.

use crate::builder::{BuildError, SessionMachineBuilder};
use crate::config::MachineConfig;
use crate::core::{
    elapsed, Clock, Event, EventPayload, GuardSet, SessionData, SessionState, Transaction,
    TransactionId, TransactionLog,
};
use crate::engine::actions::{action_for, ActionContext};
use crate::engine::listeners::{ListenerRegistry, Subscription};
use crate::engine::stats::MachineStatistics;
use crate::engine::topology;
use crate::error::{MachineError, TransitionFailure};
use crate::invariants::{
    validate_critical, InvariantContext, InvariantValidator, InvariantViolation, ValidationMode,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Receives listener faults in addition to the `tracing` warning.
pub type DiagnosticHook = Box<dyn Fn(&MachineError) + Send + Sync>;

/// A transition that committed.
#[derive(Clone, Debug, PartialEq)]
pub struct Committed {
    pub new_state: SessionState,
    pub transaction: Transaction,
    /// Invariants broken in lenient mode; always empty in strict mode
    pub warnings: Vec<InvariantViolation>,
}

/// Owns one session's data and drives it through guarded transitions.
///
/// The machine performs no locking of its own. Callers sharing it across
/// threads serialize access (for example with a `Mutex`). Since
/// [`transition`](Self::transition) takes `&mut self` and listeners only get
/// shared references, a listener is never handed a path back into the
/// machine during its own notification.
///
/// Reentry is neither rejected nor deferred by the engine. A host that wraps
/// the machine in `Arc<Mutex<_>>` and locks that same mutex from inside a
/// listener deadlocks, since the lock is still held by the outer
/// `transition`. Such a listener must hand the follow-up event to the host
/// (a channel or queue) and let the host apply it after `transition` returns.
///
/// # Example
///
/// ```rust
/// use reflex_session::core::{Event, EventPayload, GameMode, SessionState};
/// use reflex_session::SessionMachine;
///
/// let mut machine = SessionMachine::new(None, None).unwrap();
///
/// let started = machine
///     .transition(Event::StartGame, Some(EventPayload::new().game_mode(GameMode::Classic)))
///     .unwrap();
/// assert_eq!(started.new_state, SessionState::Starting);
///
/// machine.transition(Event::GameReady, None).unwrap();
/// let answered = machine
///     .transition(Event::SubmitAnswer, Some(EventPayload::correct(100)))
///     .unwrap();
/// assert_eq!(answered.transaction.new_data.score, 100);
/// ```
pub struct SessionMachine {
    data: SessionData,
    config: MachineConfig,
    guards: GuardSet,
    validator: InvariantValidator,
    log: TransactionLog,
    listeners: ListenerRegistry,
    clock: Arc<dyn Clock>,
    diagnostics: Option<DiagnosticHook>,
}

impl SessionMachine {
    /// Create a machine from an optional initial snapshot and configuration.
    ///
    /// Without a snapshot the machine starts from fresh IDLE data. Use
    /// [`SessionMachineBuilder`] to inject a clock or extra invariants.
    pub fn new(
        initial: Option<SessionData>,
        config: Option<MachineConfig>,
    ) -> Result<Self, BuildError> {
        let mut builder = SessionMachineBuilder::new().config(config.unwrap_or_default());
        if let Some(initial) = initial {
            builder = builder.initial(initial);
        }
        builder.build()
    }

    pub(crate) fn from_parts(
        data: SessionData,
        config: MachineConfig,
        validator: InvariantValidator,
        clock: Arc<dyn Clock>,
        diagnostics: Option<DiagnosticHook>,
    ) -> Self {
        Self {
            log: TransactionLog::new(config.max_transaction_history),
            data,
            config,
            guards: GuardSet::new(),
            validator,
            listeners: ListenerRegistry::new(),
            clock,
            diagnostics,
        }
    }

    pub fn current_state(&self) -> SessionState {
        self.data.current_state
    }

    /// Copy of the live session data.
    pub fn state_data(&self) -> SessionData {
        self.data.clone()
    }

    /// Copy of the transactions inside the log window, oldest first.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.log.to_vec()
    }

    /// Read-only view of the transaction log.
    pub fn transaction_log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Subscribe to commits, including rollback commits.
    pub fn add_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionData, &Transaction) + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    /// Run every invariant against the live snapshot on its own.
    ///
    /// Uses strict semantics regardless of configuration, so faulting checks
    /// are reported too.
    pub fn validate_current_state(&self) -> Vec<InvariantViolation> {
        let context = InvariantContext::snapshot(&self.data, self.clock.now());
        self.validator.validate(&context, ValidationMode::Strict)
    }

    /// Cheap check of the invariants that can never be relaxed.
    pub fn validate_critical(&self) -> Vec<InvariantViolation> {
        validate_critical(&self.data)
    }

    pub fn statistics(&self) -> MachineStatistics {
        MachineStatistics::from_log(&self.log)
    }

    /// Attempt to move the session with `event`.
    ///
    /// Order: resolve target, check topology, check guard, run action, merge,
    /// check invariants, commit. Nothing changes unless every step passes
    /// (lenient invariant failures excepted).
    pub fn transition(
        &mut self,
        event: Event,
        payload: Option<EventPayload>,
    ) -> Result<Committed, TransitionFailure> {
        let started = self.clock.now();
        let from = self.data.current_state;
        let target = topology::resolve_target(event, payload.as_ref());

        if !topology::is_allowed(event, from, target) {
            debug!(%event, %from, to = %target, "transition rejected by topology");
            return Err(MachineError::TransitionRejected {
                event,
                from,
                to: target,
            }
            .into());
        }

        if let Some(guard) = self.guards.for_event(event) {
            if !guard.check(&self.data) {
                debug!(%event, state = %from, guard = guard.name(), "guard blocked transition");
                return Err(MachineError::GuardFailed {
                    guard: guard.name(),
                    event,
                    state: from,
                }
                .into());
            }
        }

        let now = self.clock.now();
        let delta = action_for(event)(&ActionContext {
            event,
            payload: payload.as_ref(),
            data: &self.data,
            now,
        });
        let mut next = self.data.merged(delta);
        next.current_state = target;
        next.updated_at = now;

        let mode = self.config.effective_validation_mode();
        let violations = self.validator.validate(
            &InvariantContext::transition(&next, &self.data, event, now),
            mode,
        );
        if !violations.is_empty() {
            let names: Vec<String> = violations.iter().map(|v| v.name().to_string()).collect();
            if mode == ValidationMode::Strict {
                warn!(%event, %from, to = %target, violations = ?names, "invariants aborted transition");
                return Err(TransitionFailure {
                    error: MachineError::InvariantViolation {
                        event,
                        names,
                        violations,
                    },
                    rollback_data: Some(self.data.clone()),
                });
            }
            warn!(%event, %from, to = %target, violations = ?names, "committing despite broken invariants");
        }

        let previous = std::mem::replace(&mut self.data, next);
        let transaction = Transaction {
            id: Uuid::new_v4(),
            timestamp: now,
            event,
            payload,
            previous_state: from,
            new_state: target,
            previous_data: previous,
            new_data: self.data.clone(),
            rollback_data: None,
            rolled_back_to: None,
            duration: elapsed(started, self.clock.now()),
        };
        debug!(%event, %from, to = %target, id = %transaction.id, "transition committed");
        self.commit(&transaction);

        Ok(Committed {
            new_state: target,
            transaction,
            warnings: violations,
        })
    }

    /// Jump back to the snapshot a logged transaction started from.
    ///
    /// `None` targets the most recent transaction. This is a jump, not a
    /// replay: when the target is older than the latest transaction, every
    /// later commit is bypassed, and anything external that reacted to those
    /// commits is not told to undo its work.
    pub fn rollback(&mut self, id: Option<TransactionId>) -> Result<Transaction, MachineError> {
        if !self.config.enable_rollback {
            return Err(MachineError::RollbackDisabled);
        }

        let started = self.clock.now();
        let target = match id {
            Some(id) => self.log.find(id),
            None => self.log.latest(),
        }
        .ok_or(MachineError::RollbackNotFound { id })?;
        let target_id = target.id;
        let restored = target.previous_data.clone();

        let previous = std::mem::replace(&mut self.data, restored.clone());
        let transaction = Transaction {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            event: Event::RecoverFromError,
            payload: None,
            previous_state: previous.current_state,
            new_state: restored.current_state,
            previous_data: previous,
            new_data: restored.clone(),
            rollback_data: Some(restored),
            rolled_back_to: Some(target_id),
            duration: elapsed(started, self.clock.now()),
        };
        info!(
            target = %target_id,
            from = %transaction.previous_state,
            to = %transaction.new_state,
            "rolled back session"
        );
        self.commit(&transaction);

        Ok(transaction)
    }

    fn commit(&mut self, transaction: &Transaction) {
        if self.config.enable_logging {
            if let Some(evicted) = self.log.record(transaction.clone()) {
                debug!(id = %evicted.id, "evicted oldest transaction");
            }
        }

        for fault in self.listeners.notify(&self.data, transaction) {
            warn!(error = %fault, "listener fault");
            if let Some(hook) = &self.diagnostics {
                hook(&fault);
            }
        }
    }
}

impl std::fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMachine")
            .field("data", &self.data)
            .field("config", &self.config)
            .field("transactions", &self.log.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::invariants::Invariant;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn machine_with(config: MachineConfig) -> (SessionMachine, ManualClock) {
        let clock = ManualClock::default();
        let machine = SessionMachineBuilder::new()
            .config(config)
            .clock(clock.clone())
            .build()
            .unwrap();
        (machine, clock)
    }

    fn machine() -> (SessionMachine, ManualClock) {
        machine_with(MachineConfig::default())
    }

    fn active_machine() -> (SessionMachine, ManualClock) {
        let (mut machine, clock) = machine();
        machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();
        (machine, clock)
    }

    #[test]
    fn start_then_ready_activates_session() {
        let (mut machine, _) = machine();

        let started = machine
            .transition(
                Event::StartGame,
                Some(EventPayload::new().game_mode(crate::core::GameMode::Classic)),
            )
            .unwrap();
        assert_eq!(started.new_state, SessionState::Starting);
        assert!(!machine.state_data().is_active);
        assert!(!machine.state_data().has_started);

        let ready = machine.transition(Event::GameReady, None).unwrap();
        assert_eq!(ready.new_state, SessionState::Active);
        assert!(machine.state_data().is_active);
        assert!(machine.state_data().has_started);
    }

    #[test]
    fn pause_from_idle_is_rejected_without_mutation() {
        let (mut machine, _) = machine();
        let before = machine.state_data();

        let failure = machine.transition(Event::PauseGame, None).unwrap_err();

        assert!(matches!(
            failure.error,
            MachineError::TransitionRejected {
                from: SessionState::Idle,
                to: SessionState::Paused,
                ..
            }
        ));
        assert_eq!(machine.current_state(), SessionState::Idle);
        assert_eq!(machine.state_data(), before);
        assert!(machine.transaction_history().is_empty());
    }

    #[test]
    fn guard_failure_leaves_state_untouched() {
        let (mut machine, _) = active_machine();
        machine.transition(Event::PauseGame, None).unwrap();
        // Paused -> Paused is a self-transition, but the guard needs Active.
        let failure = machine.transition(Event::PauseGame, None).unwrap_err();

        assert_eq!(
            failure.error,
            MachineError::GuardFailed {
                guard: "canPauseGame",
                event: Event::PauseGame,
                state: SessionState::Paused,
            }
        );
        assert_eq!(machine.current_state(), SessionState::Paused);
    }

    #[test]
    fn correct_answer_scores() {
        let (mut machine, _) = active_machine();

        let committed = machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(100)))
            .unwrap();

        assert_eq!(committed.new_state, SessionState::Active);
        let data = machine.state_data();
        assert_eq!(data.score, 100);
        assert_eq!(data.streak, 1);
        assert_eq!(data.level, 2);
    }

    #[test]
    fn final_mistake_moves_to_ending() {
        let (mut machine, _) = active_machine();
        machine.transition(Event::SubmitAnswer, Some(EventPayload::incorrect())).unwrap();
        machine.transition(Event::SubmitAnswer, Some(EventPayload::incorrect())).unwrap();

        let committed = machine
            .transition(
                Event::SubmitAnswer,
                Some(EventPayload::incorrect().end_game()),
            )
            .unwrap();

        assert_eq!(committed.new_state, SessionState::Ending);
        let data = machine.state_data();
        assert!(!data.is_active);
        assert_eq!(data.mistakes, 3);
        assert_eq!(data.streak, 0);
    }

    #[test]
    fn error_then_recover_returns_to_idle() {
        let setups: [fn() -> (SessionMachine, ManualClock); 2] = [machine, active_machine];
        for setup in setups {
            let (mut machine, _) = setup();
            let errored = machine
                .transition(Event::ErrorOccurred, Some(EventPayload::error("x")))
                .unwrap();
            assert_eq!(errored.new_state, SessionState::Error);
            assert_eq!(machine.state_data().last_error.as_deref(), Some("x"));

            let recovered = machine.transition(Event::RecoverFromError, None).unwrap();
            assert_eq!(recovered.new_state, SessionState::Idle);
            assert_eq!(machine.state_data().score, 0);
        }
    }

    #[test]
    fn strict_invariant_failure_aborts_and_offers_snapshot() {
        let (mut machine, _) = active_machine();
        let before = machine.state_data();

        // 11s of reaction time at level 1 breaks the reaction-time bound.
        let failure = machine
            .transition(
                Event::SubmitAnswer,
                Some(EventPayload::incorrect().reaction_time(Duration::from_secs(11))),
            )
            .unwrap_err();

        match &failure.error {
            MachineError::InvariantViolation { names, .. } => {
                assert_eq!(names, &vec!["reaction_time_bounded".to_string()]);
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
        assert_eq!(failure.rollback_data.as_ref(), Some(&before));
        assert_eq!(machine.state_data(), before);
    }

    #[test]
    fn lenient_mode_commits_with_warnings() {
        let (mut machine, _) = machine_with(MachineConfig {
            validation_mode: ValidationMode::Lenient,
            ..MachineConfig::default()
        });
        machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();

        let committed = machine
            .transition(
                Event::SubmitAnswer,
                Some(EventPayload::incorrect().reaction_time(Duration::from_secs(11))),
            )
            .unwrap();

        assert_eq!(committed.warnings.len(), 1);
        assert_eq!(committed.warnings[0].name(), "reaction_time_bounded");
        assert_eq!(machine.state_data().mistakes, 1);
    }

    #[test]
    fn disabled_validation_skips_invariants() {
        let (mut machine, _) = machine_with(MachineConfig {
            enable_validation: false,
            ..MachineConfig::default()
        });
        machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();

        let committed = machine
            .transition(
                Event::SubmitAnswer,
                Some(EventPayload::incorrect().reaction_time(Duration::from_secs(11))),
            )
            .unwrap();
        assert!(committed.warnings.is_empty());
    }

    #[test]
    fn transactions_record_both_snapshots() {
        let (mut machine, clock) = active_machine();
        let before = machine.state_data();
        clock.advance(Duration::from_millis(30));

        let committed = machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(50)))
            .unwrap();
        let transaction = committed.transaction;

        assert_eq!(transaction.event, Event::SubmitAnswer);
        assert_eq!(transaction.previous_data, before);
        assert_eq!(transaction.new_data, machine.state_data());
        assert_eq!(transaction.previous_state, SessionState::Active);
        assert_eq!(transaction.new_data.updated_at, clock.now());
        assert_eq!(machine.transaction_history().len(), 3);
    }

    #[test]
    fn logging_can_be_disabled() {
        let (mut machine, _) = machine_with(MachineConfig {
            enable_logging: false,
            ..MachineConfig::default()
        });
        machine.transition(Event::StartGame, None).unwrap();

        assert!(machine.transaction_history().is_empty());
        assert_eq!(
            machine.rollback(None).unwrap_err(),
            MachineError::RollbackNotFound { id: None }
        );
    }

    #[test]
    fn rollback_restores_previous_snapshot() {
        let (mut machine, clock) = active_machine();
        let before = machine.state_data();
        clock.advance(Duration::from_millis(10));
        let committed = machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(100)))
            .unwrap();

        let rollback = machine.rollback(Some(committed.transaction.id)).unwrap();

        assert_eq!(machine.state_data(), before);
        assert_eq!(rollback.event, Event::RecoverFromError);
        assert_eq!(rollback.previous_data, committed.transaction.new_data);
        assert_eq!(rollback.new_data, before);
        assert_eq!(rollback.rolled_back_to, Some(committed.transaction.id));
        // The log only grows.
        assert_eq!(machine.transaction_history().len(), 4);
    }

    #[test]
    fn rollback_without_id_targets_latest() {
        let (mut machine, _) = active_machine();
        machine.rollback(None).unwrap();
        assert_eq!(machine.current_state(), SessionState::Starting);
    }

    #[test]
    fn rollback_can_jump_past_several_commits() {
        let (mut machine, _) = machine();
        let start = machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();
        machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(10)))
            .unwrap();

        machine.rollback(Some(start.transaction.id)).unwrap();

        assert_eq!(machine.current_state(), SessionState::Idle);
        assert_eq!(machine.state_data().score, 0);
    }

    #[test]
    fn rollback_errors() {
        let (mut machine, _) = machine();
        let missing = Uuid::new_v4();
        assert_eq!(
            machine.rollback(Some(missing)).unwrap_err(),
            MachineError::RollbackNotFound { id: Some(missing) }
        );

        let (mut disabled, _) = machine_with(MachineConfig {
            enable_rollback: false,
            ..MachineConfig::default()
        });
        disabled.transition(Event::StartGame, None).unwrap();
        assert_eq!(disabled.rollback(None).unwrap_err(), MachineError::RollbackDisabled);
        assert_eq!(disabled.current_state(), SessionState::Starting);
    }

    #[test]
    fn listeners_see_commits_until_unsubscribed() {
        let (mut machine, _) = machine();
        let seen: Arc<Mutex<Vec<Event>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = machine.add_listener(move |_, transaction| {
            sink.lock().unwrap().push(transaction.event);
        });

        machine.transition(Event::StartGame, None).unwrap();
        assert!(subscription.unsubscribe());
        machine.transition(Event::GameReady, None).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Event::StartGame]);
    }

    #[test]
    fn listener_receives_committed_data() {
        let (mut machine, _) = machine();
        let states: Arc<Mutex<Vec<SessionState>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&states);
        let _subscription = machine.add_listener(move |data, _| {
            sink.lock().unwrap().push(data.current_state);
        });

        machine.transition(Event::StartGame, None).unwrap();
        machine.rollback(None).unwrap();

        assert_eq!(
            *states.lock().unwrap(),
            vec![SessionState::Starting, SessionState::Idle]
        );
    }

    #[test]
    fn listener_panic_reaches_diagnostics_but_not_caller() {
        let faults = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&faults);
        let mut machine = SessionMachineBuilder::new()
            .clock(ManualClock::default())
            .on_listener_fault(move |error| {
                assert!(matches!(error, MachineError::ListenerFault { .. }));
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();
        let _subscription = machine.add_listener(|_, _| panic!("ui crashed"));

        let committed = machine.transition(Event::StartGame, None);

        assert!(committed.is_ok());
        assert_eq!(machine.current_state(), SessionState::Starting);
        assert_eq!(faults.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn state_data_is_a_defensive_copy() {
        let (machine, _) = machine();
        let mut copy = machine.state_data();
        copy.score = 9_999;
        copy.current_state = SessionState::GameOver;

        assert_eq!(machine.state_data().score, 0);
        assert_eq!(machine.state_data(), machine.state_data());
    }

    #[test]
    fn history_is_bounded() {
        let (mut machine, _) = machine_with(MachineConfig {
            max_transaction_history: 3,
            ..MachineConfig::default()
        });
        let first = machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();
        machine.transition(Event::PauseGame, None).unwrap();
        machine.transition(Event::ResumeGame, None).unwrap();

        let history = machine.transaction_history();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|t| t.id != first.transaction.id));
        assert!(matches!(
            machine.rollback(Some(first.transaction.id)),
            Err(MachineError::RollbackNotFound { .. })
        ));
    }

    #[test]
    fn statistics_reflect_the_log() {
        let (mut machine, _) = active_machine();
        machine
            .transition(Event::ErrorOccurred, Some(EventPayload::error("net")))
            .unwrap();

        let stats = machine.statistics();
        assert_eq!(stats.total_transitions, 3);
        assert_eq!(stats.error_count, 1);
        assert_eq!(stats.state_distribution.get(&SessionState::Active), Some(&1));
        assert!(stats
            .state_distribution
            .keys()
            .all(|s| !s.is_final()));
    }

    #[test]
    fn custom_invariants_participate() {
        let mut machine = SessionMachineBuilder::new()
            .clock(ManualClock::default())
            .invariant(Invariant::new("score_cap", |ctx| Ok(ctx.new.score <= 150)))
            .build()
            .unwrap();
        machine.transition(Event::StartGame, None).unwrap();
        machine.transition(Event::GameReady, None).unwrap();
        machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(100)))
            .unwrap();

        let failure = machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(100)))
            .unwrap_err();
        assert!(matches!(
            failure.error,
            MachineError::InvariantViolation { ref names, .. } if names == &vec!["score_cap".to_string()]
        ));
    }

    fn panicking_invariant() -> Invariant {
        Invariant::new("indexes_levels", |ctx| {
            let thresholds: Vec<u32> = Vec::new();
            Ok(thresholds[ctx.new.level as usize] == 0)
        })
    }

    #[test]
    fn panicking_invariant_aborts_strict_transition() {
        let mut machine = SessionMachineBuilder::new()
            .clock(ManualClock::default())
            .invariant(panicking_invariant())
            .build()
            .unwrap();

        let failure = machine.transition(Event::StartGame, None).unwrap_err();

        match &failure.error {
            MachineError::InvariantViolation { names, violations, .. } => {
                assert_eq!(names, &vec!["indexes_levels".to_string()]);
                assert!(matches!(
                    violations.as_slice(),
                    [InvariantViolation::Faulted { .. }]
                ));
            }
            other => panic!("expected invariant violation, got {other:?}"),
        }
        assert_eq!(machine.current_state(), SessionState::Idle);
        assert!(machine.transaction_history().is_empty());
    }

    #[test]
    fn panicking_invariant_is_ignored_in_lenient_mode() {
        let mut machine = SessionMachineBuilder::new()
            .clock(ManualClock::default())
            .config(MachineConfig {
                validation_mode: ValidationMode::Lenient,
                ..MachineConfig::default()
            })
            .invariant(panicking_invariant())
            .build()
            .unwrap();

        let committed = machine.transition(Event::StartGame, None).unwrap();

        assert!(committed.warnings.is_empty());
        assert_eq!(machine.current_state(), SessionState::Starting);
    }

    #[test]
    fn current_state_validation_is_clean_after_play() {
        let (mut machine, _) = active_machine();
        machine
            .transition(Event::SubmitAnswer, Some(EventPayload::correct(10)))
            .unwrap();

        assert!(machine.validate_current_state().is_empty());
        assert!(machine.validate_critical().is_empty());
    }

    #[test]
    fn machine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionMachine>();
    }
}
