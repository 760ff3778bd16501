//! The effectful shell around the pure signal core.
//!
//! Everything that waits, spawns, logs or talks to a collaborator lives
//! here:
//!
//! - **Approval**: the async gate a transition must pass before committing
//! - **Transition outcomes**: what a single attempt did
//! - **Controller**: owns the signal, the recurring timer and the
//!   start/stop lifecycle

mod approval;
mod controller;
mod transition;

pub use approval::{ApprovalError, ApprovalGate, SimulatedApproval};
pub use controller::SignalController;
pub use transition::TransitionOutcome;
