//! Statistics derived from the transaction log on demand.

use crate::core::{SessionState, TransactionLog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate view of the transactions still inside the log window.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineStatistics {
    pub total_transitions: usize,
    pub average_duration: Duration,
    /// Transactions grouped by the state they produced
    pub state_distribution: BTreeMap<SessionState, usize>,
    /// Transactions that ended in an error state
    pub error_count: usize,
}

impl MachineStatistics {
    pub fn from_log(log: &TransactionLog) -> Self {
        let total_transitions = log.len();
        let mut state_distribution = BTreeMap::new();
        let mut total = Duration::ZERO;
        let mut error_count = 0;

        for transaction in log.iter() {
            *state_distribution.entry(transaction.new_state).or_insert(0) += 1;
            total = total.saturating_add(transaction.duration);
            if transaction.new_state.is_error() {
                error_count += 1;
            }
        }

        let average_duration = u32::try_from(total_transitions)
            .ok()
            .filter(|n| *n > 0)
            .map_or(Duration::ZERO, |n| total / n);

        Self {
            total_transitions,
            average_duration,
            state_distribution,
            error_count,
        }
    }
}
