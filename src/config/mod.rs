//! Timing configuration for a signal controller.
//!
//! The defaults are the fixed reference cadence: one transition attempt
//! every five seconds, each waiting one second for approval. The binary
//! always runs with the defaults; custom values exist for tests and for
//! embedding the controller elsewhere.
//!
//! Validation uses Stillwater's `Validation` so every problem is reported
//! in one pass instead of stopping at the first.

use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::ConfigError;

/// Period between transition attempts.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Latency of the simulated approval call.
pub const DEFAULT_APPROVAL_DELAY: Duration = Duration::from_secs(1);

/// Upper bound accepted for any configured duration.
pub const MAX_DURATION: Duration = Duration::from_secs(60 * 60);

/// What a tick does when an earlier transition is still awaiting approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Start another transition anyway; overlapping attempts each commit
    /// against whatever state is current when their approval resolves.
    #[default]
    Allow,

    /// Skip the tick while any transition is in flight.
    Skip,
}

/// Controller timing and tick policy.
///
/// # Example
///
/// ```rust
/// use signal_light::config::{OverlapPolicy, SignalConfig};
/// use std::time::Duration;
///
/// let config = SignalConfig::default()
///     .with_tick_interval(Duration::from_millis(500))
///     .with_overlap(OverlapPolicy::Skip);
///
/// assert!(config.validate().is_success());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    pub tick_interval: Duration,
    pub approval_delay: Duration,
    pub overlap: OverlapPolicy,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            approval_delay: DEFAULT_APPROVAL_DELAY,
            overlap: OverlapPolicy::default(),
        }
    }
}

impl SignalConfig {
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_approval_delay(mut self, delay: Duration) -> Self {
        self.approval_delay = delay;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Check every field, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            non_zero("tick_interval", self.tick_interval),
            within_max("tick_interval", self.tick_interval),
            within_max("approval_delay", self.approval_delay),
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

fn non_zero(field: &'static str, value: Duration) -> Validation<(), NonEmptyVec<ConfigError>> {
    if value.is_zero() {
        Validation::fail(ConfigError::ZeroInterval { field })
    } else {
        Validation::success(())
    }
}

fn within_max(field: &'static str, value: Duration) -> Validation<(), NonEmptyVec<ConfigError>> {
    if value > MAX_DURATION {
        Validation::fail(ConfigError::DurationTooLong {
            field,
            value,
            max: MAX_DURATION,
        })
    } else {
        Validation::success(())
    }
}
