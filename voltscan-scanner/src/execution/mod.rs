//! Execution collaborator — order dispatch behind a trait seam.
//!
//! The lifecycle controller has already cleared its ghost order by the time
//! an intent reaches this layer: success and failure look identical to the
//! state machine, and nothing here is retried.

pub mod live;
pub mod paper;

pub use live::LiveExecution;
pub use paper::PaperExecution;

use thiserror::Error;
use voltscan_core::TradeIntent;

/// Venue-assigned (or simulated) identifier for a placed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractId(pub String);

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed execution failures, reported via notification and journal.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("price proposal failed: {0}")]
    Proposal(String),

    #[error("order rejected by venue: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for order execution. Both modes are opaque to the scan loop: one
/// call in, contract id or typed failure out.
pub trait ExecutionClient: Send + Sync {
    /// Mode label for logs and notifications ("paper", "live").
    fn mode(&self) -> &str;

    /// Place a leveraged directional order with stop-loss and take-profit.
    fn place_order(&self, intent: &TradeIntent) -> Result<ContractId, ExecError>;
}
