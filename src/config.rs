//! Machine configuration.
//!
//! [`MachineConfig`] is plain data: it can be built in code, or read from JSON
//! where every missing field falls back to its default.

use crate::invariants::ValidationMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on the transaction log.
pub const DEFAULT_MAX_TRANSACTION_HISTORY: usize = 1000;

/// Errors that can occur when loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("max_transaction_history must be at least 1")]
    InvalidHistoryLimit,
}

/// Behaviour switches for a session machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Append committed transactions to the transaction log.
    pub enable_logging: bool,
    /// Run invariants on every candidate snapshot.
    pub enable_validation: bool,
    /// Size of the transaction log window.
    pub max_transaction_history: usize,
    /// Allow `rollback`.
    pub enable_rollback: bool,
    pub validation_mode: ValidationMode,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            enable_validation: true,
            max_transaction_history: DEFAULT_MAX_TRANSACTION_HISTORY,
            enable_rollback: true,
            validation_mode: ValidationMode::Strict,
        }
    }
}

impl MachineConfig {
    /// Parse and check a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_transaction_history == 0 {
            return Err(ConfigError::InvalidHistoryLimit);
        }
        Ok(())
    }

    /// Mode the engine actually validates with, folding in `enable_validation`.
    pub fn effective_validation_mode(&self) -> ValidationMode {
        if self.enable_validation {
            self.validation_mode
        } else {
            ValidationMode::Disabled
        }
    }
}
