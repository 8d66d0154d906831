//! Swap orchestration.
//!
//! Sequences approve and swap calls, waits for each to be mined, and records
//! every confirmed swap in the history.

use std::sync::Arc;

use alloy::primitives::U256;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    history::HistoryStore,
    session::Session,
    services::status::{InFlight, StatusTracker},
    types::{format_ether, SwapKind, TransactionRecord},
};

/// Fail with `InsufficientBalance` when `amount` exceeds `available`.
pub fn ensure_sufficient_balance(amount: U256, available: U256) -> Result<()> {
    if amount > available {
        return Err(AppError::InsufficientBalance {
            required: format_ether(amount),
            available: format_ether(available),
        });
    }
    Ok(())
}

/// Runs swaps for a connected session, one at a time.
#[derive(Clone)]
pub struct SwapOrchestrator {
    history: Arc<RwLock<HistoryStore>>,
    status: StatusTracker,
    enforce_balance_check: bool,
}

impl SwapOrchestrator {
    /// Create a new orchestrator writing to `history`.
    pub fn new(history: Arc<RwLock<HistoryStore>>, enforce_balance_check: bool) -> Self {
        Self { history, status: StatusTracker::new(), enforce_balance_check }
    }

    /// Busy state of the orchestrator.
    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    /// History the orchestrator appends to.
    pub fn history(&self) -> &Arc<RwLock<HistoryStore>> {
        &self.history
    }

    /// Swap `amount` wei for tokens.
    pub async fn swap_native_to_token(
        &self,
        session: &Session,
        amount: U256,
    ) -> Result<TransactionRecord> {
        let in_flight = self.status.begin(SwapKind::NativeToToken)?;
        self.swap_in_flight(in_flight, session, SwapKind::NativeToToken, amount).await
    }

    /// Approve then swap `amount` tokens for ETH.
    pub async fn swap_token_to_native(
        &self,
        session: &Session,
        amount: U256,
    ) -> Result<TransactionRecord> {
        let in_flight = self.status.begin(SwapKind::TokenToNative)?;
        self.swap_in_flight(in_flight, session, SwapKind::TokenToNative, amount).await
    }

    /// Grant the swap contract an allowance of `amount` and wait until it is mined.
    pub async fn approve_spend(&self, session: &Session, amount: U256) -> Result<()> {
        let contracts = session.contracts();
        let spender = contracts.swap.address();

        tracing::info!(spender = %spender, amount = %amount, "Approving token spend");
        let tx = contracts.token.approve(spender, amount).await?;
        tracing::info!(tx_hash = %tx.hash, "Approval done");

        Ok(())
    }

    /// Check `amount` against the balance the swap would draw from.
    ///
    /// ETH swaps compare against the session's native balance; token swaps
    /// query the token balance of the account.
    pub async fn check_balance(&self, session: &Session, kind: SwapKind, amount: U256) -> Result<()> {
        let available = match kind {
            SwapKind::NativeToToken => session.balance(),
            SwapKind::TokenToNative => {
                session.contracts().token.balance_of(session.account()).await?
            }
        };
        ensure_sufficient_balance(amount, available)
    }

    /// Run a swap whose `Submitting` slot was already taken with
    /// [`StatusTracker::begin`]. The guard is settled when this returns.
    pub async fn swap_in_flight(
        &self,
        in_flight: InFlight,
        session: &Session,
        kind: SwapKind,
        amount: U256,
    ) -> Result<TransactionRecord> {
        match self.execute(session, kind, amount).await {
            Ok(record) => {
                in_flight.succeed();
                Ok(record)
            }
            Err(e) => {
                tracing::error!(kind = %kind, amount = %amount, error = %e, "Transaction failed");
                in_flight.fail(&e);
                Err(e)
            }
        }
    }

    async fn execute(&self, session: &Session, kind: SwapKind, amount: U256) -> Result<TransactionRecord> {
        if self.enforce_balance_check {
            self.check_balance(session, kind, amount).await?;
        }

        tracing::info!(kind = %kind, amount = %amount, account = %session.account(), "Submitting swap");

        let swap = &session.contracts().swap;
        let tx = match kind {
            SwapKind::NativeToToken => swap.swap_native_to_token(amount).await?,
            SwapKind::TokenToNative => {
                // The swap pulls tokens, so the allowance must be mined first.
                self.approve_spend(session, amount).await?;
                swap.swap_token_to_native(amount).await?
            }
        };

        let record = TransactionRecord::new(kind, amount, tx);
        self.history.write().await.append(record.clone()).await;

        tracing::info!(kind = %kind, tx_hash = %record.hash, value = %record.value, "Transaction successful");

        Ok(record)
    }
}

impl std::fmt::Debug for SwapOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapOrchestrator")
            .field("status", &self.status)
            .field("enforce_balance_check", &self.enforce_balance_check)
            .finish()
    }
}
