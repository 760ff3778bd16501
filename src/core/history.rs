//! History of committed signal transitions.
//!
//! Only approved transitions are recorded. Rejected and failed attempts
//! leave no entry, so the history path always follows the signal cycle.

use super::state::SignalState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use signal_light::core::{SignalState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: SignalState::Red,
///     to: SignalState::Yellow,
///     timestamp: Utc::now(),
///     attempt: 1,
/// };
/// assert_eq!(transition.to, transition.from.next());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: SignalState,
    /// The state being transitioned to
    pub to: SignalState,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
    /// Sequence number of the attempt that committed this transition
    pub attempt: u64,
}

/// Ordered history of committed transitions.
///
/// `record` returns a new history with the transition appended; the
/// original is left untouched.
///
/// # Example
///
/// ```rust
/// use signal_light::core::{SignalState, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: SignalState::Red,
///         to: SignalState::Yellow,
///         timestamp: Utc::now(),
///         attempt: 1,
///     })
///     .record(StateTransition {
///         from: SignalState::Yellow,
///         to: SignalState::Green,
///         timestamp: Utc::now(),
///         attempt: 2,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![SignalState::Red, SignalState::Yellow, SignalState::Green]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<SignalState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Wall-clock time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
