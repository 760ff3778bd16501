//! Operator input: the stop command.
//!
//! The listener is handed an explicit controller handle when it is built.
//! It reads line-oriented input, so the operator types `s` and presses
//! Enter.

use crate::effects::SignalController;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

/// Why [`StopListener::listen`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator issued the stop command and the controller was stopped
    Command,

    /// Input ended before any stop command; the controller was left alone
    InputClosed,
}

/// True for a line that asks the signal to stop (`s` or `S`).
pub fn is_stop_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("s")
}

/// Watches operator input and stops the controller on command.
#[derive(Debug, Clone)]
pub struct StopListener {
    controller: SignalController,
}

impl StopListener {
    pub fn new(controller: SignalController) -> Self {
        Self { controller }
    }

    /// Read lines until a stop command or end of input.
    pub async fn listen<R>(&self, reader: R) -> std::io::Result<StopReason>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if is_stop_command(&line) {
                self.controller.stop();
                return Ok(StopReason::Command);
            }
            debug!(input = %line.trim(), "ignoring operator input");
        }
        Ok(StopReason::InputClosed)
    }
}
