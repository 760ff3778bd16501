//! Signal states and the lamp view handed to the presentation layer.
//!
//! All methods here are pure. The only place a signal state changes is
//! the controller's transition step, which asks a state for its `next()`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three states of a traffic signal.
///
/// The order is fixed and cyclic: `Red -> Yellow -> Green -> Red`.
///
/// # Example
///
/// ```rust
/// use signal_light::core::SignalState;
///
/// let state = SignalState::Red;
/// assert_eq!(state.next(), SignalState::Yellow);
/// assert_eq!(state.next().next().next(), SignalState::Red);
/// assert_eq!(state.name(), "RED");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum SignalState {
    #[default]
    Red,
    Yellow,
    Green,
}

impl SignalState {
    /// Every state in cycle order, starting from the initial state.
    pub const ALL: [SignalState; 3] = [Self::Red, Self::Yellow, Self::Green];

    /// Upper-case display name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
        }
    }

    /// The state an approved transition moves to.
    pub fn next(&self) -> Self {
        match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Green,
            Self::Green => Self::Red,
        }
    }

    /// The state reached after `steps` approved transitions from `self`.
    pub fn advance(&self, steps: usize) -> Self {
        let position = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(position + steps % Self::ALL.len()) % Self::ALL.len()]
    }

    /// Lamp view of this state: exactly one lamp is on.
    pub fn lamps(&self) -> LampStates {
        LampStates {
            red: matches!(self, Self::Red),
            yellow: matches!(self, Self::Yellow),
            green: matches!(self, Self::Green),
        }
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of the three lamps are lit.
///
/// This is what the presentation layer receives on every notification.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LampStates {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl LampStates {
    /// Number of lamps currently lit.
    pub fn lit_count(&self) -> usize {
        [self.red, self.yellow, self.green]
            .iter()
            .filter(|on| **on)
            .count()
    }

    /// The single active state, if exactly one lamp is lit.
    pub fn active(&self) -> Option<SignalState> {
        if self.lit_count() != 1 {
            return None;
        }
        SignalState::ALL
            .into_iter()
            .find(|state| state.lamps() == *self)
    }
}

impl From<SignalState> for LampStates {
    fn from(state: SignalState) -> Self {
        state.lamps()
    }
}
