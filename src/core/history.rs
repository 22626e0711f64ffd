//! Committed transactions and the bounded log that holds them.
//!
//! Transactions are immutable values; the log hands out references and
//! clones, never mutable access. Once more than `capacity` transactions
//! have been recorded the oldest ones are gone for good.

use super::data::SessionData;
use super::event::{Event, EventPayload};
use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Identifier of a committed transaction.
pub type TransactionId = Uuid;

/// Record of one committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
    pub event: Event,
    pub payload: Option<EventPayload>,
    pub previous_state: SessionState,
    pub new_state: SessionState,
    pub previous_data: SessionData,
    pub new_data: SessionData,
    /// Snapshot a rollback restored, set on rollback commits only
    pub rollback_data: Option<SessionData>,
    /// Transaction whose previous snapshot a rollback restored
    pub rolled_back_to: Option<TransactionId>,
    /// Time spent between accepting the event and committing
    pub duration: Duration,
}

/// Ordered, bounded history of committed transactions.
///
/// # Example
///
/// ```rust
/// use reflex_session::core::TransactionLog;
///
/// let log = TransactionLog::new(1000);
/// assert!(log.is_empty());
/// assert_eq!(log.capacity(), 1000);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionLog {
    capacity: usize,
    transactions: VecDeque<Transaction>,
}

impl TransactionLog {
    /// Create an empty log holding at most `capacity` transactions.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            transactions: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Append a transaction, evicting the oldest one when full.
    ///
    /// Returns the evicted transaction, if any.
    pub fn record(&mut self, transaction: Transaction) -> Option<Transaction> {
        self.transactions.push_back(transaction);
        if self.transactions.len() > self.capacity {
            self.transactions.pop_front()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Most recently committed transaction.
    pub fn latest(&self) -> Option<&Transaction> {
        self.transactions.back()
    }

    /// Look up a transaction still inside the window.
    pub fn find(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Transactions in commit order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Owned copy of the window, oldest first.
    pub fn to_vec(&self) -> Vec<Transaction> {
        self.transactions.iter().cloned().collect()
    }

    /// States traversed inside the window: the first transaction's previous
    /// state, then every new state.
    pub fn path(&self) -> Vec<SessionState> {
        let mut path = Vec::with_capacity(self.transactions.len() + 1);
        if let Some(first) = self.transactions.front() {
            path.push(first.previous_state);
        }
        path.extend(self.transactions.iter().map(|t| t.new_state));
        path
    }

    /// Time between the first and last transaction in the window.
    ///
    /// Returns `None` if the log is empty.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.transactions.front()?, self.transactions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
