//! Business logic services module.

pub mod orchestrator;
pub mod status;

pub use orchestrator::{ensure_sufficient_balance, SwapOrchestrator};
pub use status::{InFlight, StatusTracker, TxStatus};
