//! Signer-bound contract handles.
//!
//! The swap and token contracts are reached only through the two traits
//! below, so the orchestrator can run against any implementation.

use std::sync::Arc;

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{DynProvider, PendingTransactionBuilder},
};
use async_trait::async_trait;

use crate::{
    config::Config,
    error::{AppError, Result},
    ethereum::contracts::{IERC20, ISatSwap},
    types::ConfirmedTx,
};

/// Swap contract entry points.
#[async_trait]
pub trait SwapContract: Send + Sync {
    /// Deployed address; this is also the spender for token approvals.
    fn address(&self) -> Address;

    /// Pay `amount` wei and receive tokens. Resolves once the transaction is mined.
    async fn swap_native_to_token(&self, amount: U256) -> Result<ConfirmedTx>;

    /// Pay `amount` tokens and receive ETH. The contract pulls the tokens, so
    /// an allowance of at least `amount` must already be confirmed.
    async fn swap_token_to_native(&self, amount: U256) -> Result<ConfirmedTx>;
}

/// ERC-20 token entry points.
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Deployed address.
    fn address(&self) -> Address;

    /// Set `spender`'s allowance to `amount`. Resolves once the transaction is mined.
    async fn approve(&self, spender: Address, amount: U256) -> Result<ConfirmedTx>;

    /// Token balance of `account`.
    async fn balance_of(&self, account: Address) -> Result<U256>;
}

/// Addresses of the deployed contract pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub swap: Address,
    pub token: Address,
}

impl From<&Config> for ContractAddresses {
    fn from(config: &Config) -> Self {
        Self { swap: config.swap_contract, token: config.token_contract }
    }
}

/// The two handles a connected session holds.
#[derive(Clone)]
pub struct ContractPair {
    pub swap: Arc<dyn SwapContract>,
    pub token: Arc<dyn TokenContract>,
}

impl ContractPair {
    /// Bind both contracts to a signing provider.
    pub fn bind(provider: DynProvider, addresses: ContractAddresses) -> Self {
        Self {
            swap: Arc::new(SwapContractHandle::new(addresses.swap, provider.clone())),
            token: Arc::new(TokenContractHandle::new(addresses.token, provider)),
        }
    }
}

impl std::fmt::Debug for ContractPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractPair")
            .field("swap", &self.swap.address())
            .field("token", &self.token.address())
            .finish()
    }
}

/// Wait for a submitted transaction and require a successful receipt.
async fn confirm(pending: PendingTransactionBuilder<Ethereum>, action: &str) -> Result<ConfirmedTx> {
    let tx_hash = *pending.tx_hash();
    tracing::info!(tx_hash = %tx_hash, action, "Waiting for the transaction to complete");

    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        tracing::warn!(tx_hash = %tx_hash, action, "Transaction reverted");
        return Err(AppError::Reverted(receipt.transaction_hash));
    }

    tracing::info!(
        tx_hash = %receipt.transaction_hash,
        block = ?receipt.block_number,
        action,
        "Transaction confirmed"
    );

    Ok(ConfirmedTx { hash: receipt.transaction_hash, from: receipt.from })
}

/// alloy-backed swap contract handle.
#[derive(Clone)]
pub struct SwapContractHandle {
    contract: ISatSwap::ISatSwapInstance<DynProvider>,
}

impl SwapContractHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { contract: ISatSwap::new(address, provider) }
    }
}

#[async_trait]
impl SwapContract for SwapContractHandle {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn swap_native_to_token(&self, amount: U256) -> Result<ConfirmedTx> {
        // The amount is both the call argument and the attached value.
        let pending = self.contract.swapFromETHToTokens(amount).value(amount).send().await?;
        confirm(pending, "swapFromETHToTokens").await
    }

    async fn swap_token_to_native(&self, amount: U256) -> Result<ConfirmedTx> {
        let pending = self.contract.swapTokensForETH(amount).send().await?;
        confirm(pending, "swapTokensForETH").await
    }
}

/// alloy-backed ERC-20 handle.
#[derive(Clone)]
pub struct TokenContractHandle {
    contract: IERC20::IERC20Instance<DynProvider>,
}

impl TokenContractHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { contract: IERC20::new(address, provider) }
    }
}

#[async_trait]
impl TokenContract for TokenContractHandle {
    fn address(&self) -> Address {
        *self.contract.address()
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<ConfirmedTx> {
        let pending = self.contract.approve(spender, amount).send().await?;
        confirm(pending, "approve").await
    }

    async fn balance_of(&self, account: Address) -> Result<U256> {
        let balance = self.contract.balanceOf(account).call().await?;
        Ok(balance)
    }
}
