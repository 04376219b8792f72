//! Transition log tracking.
//!
//! Keeps the most recent changes committed to a state slot.

use super::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// Only transitions that actually changed the value are recorded; no-op
/// transitions leave no trace.
///
/// # Example
///
/// ```rust
/// use microstate::{TransitionRecord, Value};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     name: "increment".to_string(),
///     from: Value::from(42),
///     to: Value::from(43),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.name, "increment");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the transition that fired
    pub name: String,
    /// The root value before the transition
    pub from: Value,
    /// The root value after the transition
    pub to: Value,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Number of records a log keeps unless told otherwise.
pub const DEFAULT_LOG_LIMIT: usize = 64;

/// Bounded, ordered log of committed transitions.
///
/// Records are appended in place. Once the log holds `limit` records the
/// oldest one is evicted for every new one, so a long-lived slot keeps a
/// fixed amount of history.
///
/// # Example
///
/// ```rust
/// use microstate::{TransitionLog, TransitionRecord, Value};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::with_limit(2);
/// for (from, to) in [(1, 2), (2, 3), (3, 4)] {
///     log.record(TransitionRecord {
///         name: "increment".to_string(),
///         from: Value::from(from),
///         to: Value::from(to),
///         timestamp: Utc::now(),
///     });
/// }
///
/// let path = log.get_path();
/// assert_eq!(path, vec![&Value::from(2), &Value::from(3), &Value::from(4)]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog {
    transitions: VecDeque<TransitionRecord>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LOG_LIMIT
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionLog {
    /// Create a new empty log keeping [`DEFAULT_LOG_LIMIT`] records.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LOG_LIMIT)
    }

    /// Create a new empty log keeping at most `limit` records.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(DEFAULT_LOG_LIMIT)),
            limit,
        }
    }

    /// Append a record, evicting the oldest ones past the limit.
    pub fn record(&mut self, transition: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of values traversed.
    ///
    /// Returns the value before the oldest retained transition, then the
    /// `to` value of each transition.
    pub fn get_path(&self) -> Vec<&Value> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|transition| &transition.to));
        path
    }

    /// Time between the oldest retained and the last recorded transition.
    ///
    /// Returns `None` for an empty log.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.back()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
