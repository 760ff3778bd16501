//! The approval gate every transition waits on before committing.

use crate::core::SignalState;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors an approval request can fail with.
///
/// The controller never propagates these; a failed request is logged and
/// the signal stays where it is for that cycle.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApprovalError {
    #[error("Approval service unavailable: {0}")]
    Unavailable(String),

    #[error("Approval request failed: {0}")]
    RequestFailed(String),
}

/// External gate that must approve a transition before it commits.
///
/// `Ok(true)` approves, `Ok(false)` rejects, `Err` means the request
/// itself failed.
#[async_trait]
pub trait ApprovalGate: Send + Sync {
    async fn request_approval(&self, from: SignalState) -> Result<bool, ApprovalError>;
}

/// Stand-in for a remote approval call: waits a fixed delay, then approves.
#[derive(Debug, Clone)]
pub struct SimulatedApproval {
    delay: Duration,
}

impl SimulatedApproval {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ApprovalGate for SimulatedApproval {
    async fn request_approval(&self, from: SignalState) -> Result<bool, ApprovalError> {
        tracing::trace!(from = %from, delay = ?self.delay, "requesting approval");
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}
