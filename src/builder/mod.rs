//! Fluent construction of a [`SignalController`].
//!
//! The builder validates the configuration before anything is spawned, so
//! a controller that exists is always able to start.

pub mod error;

pub use error::BuildError;

use crate::config::SignalConfig;
use crate::effects::{ApprovalGate, SignalController, SimulatedApproval};
use crate::presentation::Presentation;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for a signal controller.
///
/// Only the presentation is required. Without an explicit approval gate the
/// controller uses a [`SimulatedApproval`] with the configured delay.
///
/// # Example
///
/// ```
/// use signal_light::builder::SignalControllerBuilder;
/// use signal_light::config::SignalConfig;
/// use signal_light::presentation::TerminalPresentation;
/// use std::time::Duration;
///
/// let controller = SignalControllerBuilder::new()
///     .config(SignalConfig::default().with_tick_interval(Duration::from_secs(2)))
///     .presentation(TerminalPresentation::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.config().tick_interval, Duration::from_secs(2));
/// ```
#[derive(Default)]
pub struct SignalControllerBuilder {
    config: SignalConfig,
    gate: Option<Arc<dyn ApprovalGate>>,
    presentation: Option<Arc<dyn Presentation>>,
}

impl SignalControllerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the timing configuration.
    pub fn config(mut self, config: SignalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the approval gate (optional).
    pub fn approval<G>(mut self, gate: G) -> Self
    where
        G: ApprovalGate + 'static,
    {
        self.gate = Some(Arc::new(gate));
        self
    }

    /// Set the presentation layer (required).
    pub fn presentation<P>(mut self, presentation: P) -> Self
    where
        P: Presentation + 'static,
    {
        self.presentation = Some(Arc::new(presentation));
        self
    }

    /// Validate and build. The returned controller has already rendered RED.
    pub fn build(self) -> Result<SignalController, BuildError> {
        if let Validation::Failure(errors) = self.config.validate() {
            return Err(BuildError::InvalidConfig(errors.iter().cloned().collect()));
        }

        let presentation = self.presentation.ok_or(BuildError::MissingPresentation)?;
        let gate: Arc<dyn ApprovalGate> = match self.gate {
            Some(gate) => gate,
            None => Arc::new(SimulatedApproval::new(self.config.approval_delay)),
        };

        Ok(SignalController::new(self.config, gate, presentation))
    }
}
