//! Builder for constructing session machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Clock, SessionData, SystemClock};
use crate::engine::{DiagnosticHook, SessionMachine};
use crate::error::MachineError;
use crate::invariants::{Invariant, InvariantContext, InvariantValidator, ValidationMode};
use std::sync::Arc;

/// Builder for constructing session machines with a fluent API.
pub struct SessionMachineBuilder {
    initial: Option<SessionData>,
    config: MachineConfig,
    clock: Option<Arc<dyn Clock>>,
    validator: InvariantValidator,
    diagnostics: Option<DiagnosticHook>,
}

impl SessionMachineBuilder {
    /// Create a new builder with default configuration, the system clock and
    /// the standard invariants.
    pub fn new() -> Self {
        Self {
            initial: None,
            config: MachineConfig::default(),
            clock: None,
            validator: InvariantValidator::standard(),
            diagnostics: None,
        }
    }

    /// Start from this snapshot instead of fresh IDLE data.
    pub fn initial(mut self, data: SessionData) -> Self {
        self.initial = Some(data);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `clock` for every timestamp and duration.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Add an invariant on top of the current set.
    pub fn invariant(mut self, invariant: Invariant) -> Self {
        self.validator.push(invariant);
        self
    }

    /// Replace the whole invariant set.
    pub fn validator(mut self, validator: InvariantValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Report listener faults to `hook` as well as to the log.
    pub fn on_listener_fault<F>(mut self, hook: F) -> Self
    where
        F: Fn(&MachineError) + Send + Sync + 'static,
    {
        self.diagnostics = Some(Box::new(hook));
        self
    }

    /// Build the machine.
    ///
    /// Fails if the configuration is invalid, or if a supplied initial
    /// snapshot breaks invariants under strict validation.
    pub fn build(self) -> Result<SessionMachine, BuildError> {
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let data = match self.initial {
            Some(data) => {
                let mode = self.config.effective_validation_mode();
                let violations = self
                    .validator
                    .validate(&InvariantContext::snapshot(&data, clock.now()), mode);
                if !violations.is_empty() {
                    if mode == ValidationMode::Strict {
                        return Err(BuildError::InvalidInitialSnapshot { violations });
                    }
                    tracing::warn!(
                        violations = violations.len(),
                        "initial snapshot breaks invariants"
                    );
                }
                data
            }
            None => SessionData::new(clock.now()),
        };

        Ok(SessionMachine::from_parts(
            data,
            self.config,
            self.validator,
            clock,
            self.diagnostics,
        ))
    }
}

impl Default for SessionMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
