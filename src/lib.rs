//! Signal Light: an approval-gated traffic signal state machine
//!
//! A single signal cycles `RED -> YELLOW -> GREEN -> RED` on a recurring
//! timer. Every step waits on an asynchronous approval gate before it
//! commits; a rejected or failed approval leaves the signal where it is.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **core**: signal states, lamp views and transition history, all pure
//! - **effects**: the approval gate and the controller that owns the timer
//! - **presentation** / **input**: thin collaborators for display and the
//!   operator's stop command
//!
//! # Example
//!
//! ```rust
//! use signal_light::core::{LampStates, SignalState};
//! use signal_light::presentation::Presentation;
//! use signal_light::{SignalController, TransitionOutcome};
//!
//! struct Quiet;
//!
//! impl Presentation for Quiet {
//!     fn render(&self, _lamps: LampStates) {}
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let controller = SignalController::builder()
//!     .presentation(Quiet)
//!     .build()
//!     .unwrap();
//!
//! let outcome = controller.transition().await;
//! assert!(outcome.is_advanced());
//! assert_eq!(controller.state(), SignalState::Yellow);
//! # });
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod input;
pub mod presentation;

// Re-export commonly used types
pub use builder::{BuildError, SignalControllerBuilder};
pub use config::{OverlapPolicy, SignalConfig};
pub use core::{LampStates, SignalState, StateHistory, StateTransition};
pub use effects::{ApprovalError, ApprovalGate, SignalController, TransitionOutcome};
pub use input::{StopListener, StopReason};
