//! Configuration error types.

use std::time::Duration;
use thiserror::Error;

/// Problems found while validating a [`SignalConfig`](super::SignalConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A recurring timer cannot fire on a zero period
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },

    #[error("{field} ({value:?}) exceeds the maximum of {max:?}")]
    DurationTooLong {
        field: &'static str,
        value: Duration,
        max: Duration,
    },
}
