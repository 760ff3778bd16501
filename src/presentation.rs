//! Presentation collaborator: whatever shows the three lamps.

use crate::core::LampStates;
use std::io::Write;

/// Receives the lamp view every time the controller notifies.
///
/// Rendering has no failure mode as far as the controller is concerned.
/// The controller holds none of its locks while calling `render`, so an
/// implementation may query the controller it is attached to.
pub trait Presentation: Send + Sync {
    fn render(&self, lamps: LampStates);
}

/// Prints one line per notification to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresentation;

impl TerminalPresentation {
    pub fn new() -> Self {
        Self
    }
}

impl Presentation for TerminalPresentation {
    fn render(&self, lamps: LampStates) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not the controller's problem.
        let _ = writeln!(stdout, "{}", format_lamps(lamps));
    }
}

/// Render a lamp set as a single line, e.g. `(●) RED  ( ) YELLOW  ( ) GREEN`.
pub fn format_lamps(lamps: LampStates) -> String {
    let lamp = |on: bool, name: &str| format!("({}) {}", if on { '●' } else { ' ' }, name);
    [
        lamp(lamps.red, "RED"),
        lamp(lamps.yellow, "YELLOW"),
        lamp(lamps.green, "GREEN"),
    ]
    .join("  ")
}
