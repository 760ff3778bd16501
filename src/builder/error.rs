//! Build errors for the controller builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a signal controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Presentation not specified. Call .presentation(view) before .build()")]
    MissingPresentation,

    #[error("Invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
