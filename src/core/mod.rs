//! Core signal types.
//!
//! This module holds the pure part of the signal:
//! - `SignalState` and its fixed cycle
//! - `LampStates`, the view handed to the presentation layer
//! - Immutable history of committed transitions
//!
//! Nothing in here performs I/O, sleeps, or logs.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{LampStates, SignalState};
