//! Outcome of a single gated transition attempt.

use crate::core::SignalState;
use crate::effects::approval::ApprovalError;

/// What one call to `transition()` did.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionOutcome {
    /// Approval granted, signal moved on
    Advanced { from: SignalState, to: SignalState },

    /// Gate answered no; signal unchanged
    Rejected { state: SignalState },

    /// Approval call failed; signal unchanged
    Failed {
        state: SignalState,
        error: ApprovalError,
    },
}

impl TransitionOutcome {
    /// Build the outcome for an approval answer observed while the signal
    /// was in `current`.
    pub fn from_approval(current: SignalState, approval: Result<bool, ApprovalError>) -> Self {
        match approval {
            Ok(true) => Self::Advanced {
                from: current,
                to: current.next(),
            },
            Ok(false) => Self::Rejected { state: current },
            Err(error) => Self::Failed {
                state: current,
                error,
            },
        }
    }

    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }

    /// Signal state once this outcome has been applied.
    pub fn resulting_state(&self) -> SignalState {
        match self {
            Self::Advanced { to, .. } => *to,
            Self::Rejected { state } | Self::Failed { state, .. } => *state,
        }
    }
}
