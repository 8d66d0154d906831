//! Session bootstrap.
//!
//! Probes for a signer. Without one the client stays on a read-only
//! connection; with one it resolves the account, its balance and the two
//! signer-bound contract handles.

use std::sync::Arc;

use alloy::{
    primitives::{Address, U256},
    providers::{DynProvider, Provider},
};
use async_trait::async_trait;

use crate::{
    bindings::{ContractAddresses, ContractPair},
    config::Config,
    error::Result,
    ethereum::{constants::DEFAULT_CHAIN_ID, EthereumClient, WalletManager},
};

/// A connected signer, the boundary the session is bootstrapped through.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Active account.
    fn address(&self) -> Address;

    /// Native balance of the active account, in wei.
    async fn native_balance(&self) -> Result<U256>;

    /// Contract handles that sign as the active account.
    fn bind_contracts(&self, addresses: ContractAddresses) -> ContractPair;
}

/// Wallet backed by a local key and a signing HTTP provider.
#[derive(Clone)]
pub struct SignerWallet {
    wallet: WalletManager,
    provider: DynProvider,
}

impl SignerWallet {
    /// Build the signing provider. No network call is made here.
    pub fn new(wallet: WalletManager, rpc_url: &str) -> Result<Self> {
        let provider = wallet.connect(rpc_url)?;
        Ok(Self { wallet, provider })
    }
}

#[async_trait]
impl WalletProvider for SignerWallet {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn native_balance(&self) -> Result<U256> {
        let balance = self.provider.get_balance(self.wallet.address()).await?;
        Ok(balance)
    }

    fn bind_contracts(&self, addresses: ContractAddresses) -> ContractPair {
        ContractPair::bind(self.provider.clone(), addresses)
    }
}

/// Everything a swap needs from the connected account.
///
/// A session is never mutated; [`Session::refresh`] produces a new one.
#[derive(Clone)]
pub struct Session {
    account: Address,
    balance: U256,
    contracts: ContractPair,
    wallet: Arc<dyn WalletProvider>,
    addresses: ContractAddresses,
}

impl Session {
    /// Resolve the account and its balance, then bind the contracts to the wallet.
    pub async fn open(wallet: Arc<dyn WalletProvider>, addresses: ContractAddresses) -> Result<Self> {
        let account = wallet.address();
        let balance = wallet.native_balance().await?;
        let contracts = wallet.bind_contracts(addresses);

        tracing::info!(account = %account, balance = %balance, "Session connected");

        Ok(Self { account, balance, contracts, wallet, addresses })
    }

    /// Active account.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Native balance at the time the session was built.
    pub fn balance(&self) -> U256 {
        self.balance
    }

    /// Signer-bound contract handles.
    pub fn contracts(&self) -> &ContractPair {
        &self.contracts
    }

    /// Re-read the balance and rebind the contracts, replacing the session wholesale.
    pub async fn refresh(&self) -> Result<Session> {
        Session::open(self.wallet.clone(), self.addresses).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("balance", &self.balance)
            .field("contracts", &self.contracts)
            .finish()
    }
}

/// Outcome of bootstrapping.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No signer available; only the read-only connection exists.
    ReadOnly(EthereumClient),
    /// A signer exists but connecting failed. Not retried automatically.
    Disconnected { reason: String },
    /// Signer connected.
    Connected(Session),
}

impl SessionState {
    /// The connected session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Connected(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected(_))
    }
}

/// Resolve the session from an optional wallet.
///
/// Connection failures are logged and leave the state `Disconnected`.
pub async fn connect(
    wallet: Option<Arc<dyn WalletProvider>>,
    read_only: EthereumClient,
    addresses: ContractAddresses,
) -> SessionState {
    let Some(wallet) = wallet else {
        tracing::warn!(rpc_url = %read_only.rpc_url(), "No signer configured: using read-only connection");
        return SessionState::ReadOnly(read_only);
    };

    match Session::open(wallet, addresses).await {
        Ok(session) => SessionState::Connected(session),
        Err(e) => {
            tracing::error!(error = %e, "Loading account failed");
            SessionState::Disconnected { reason: e.to_string() }
        }
    }
}

/// Ask the node which chain it serves. A chain other than the one the swap
/// pair is deployed on is logged, not rejected.
pub async fn verify_chain(client: &EthereumClient) -> Result<u64> {
    let chain_id = client.chain_id().await?;
    if chain_id != DEFAULT_CHAIN_ID {
        tracing::warn!(
            chain_id,
            expected = DEFAULT_CHAIN_ID,
            "Node serves a different chain than the swap contracts"
        );
    }
    Ok(chain_id)
}

/// Bootstrap from configuration: a configured key is the signer.
///
/// Only configuration errors are returned; everything else is folded into
/// the resulting [`SessionState`].
pub async fn bootstrap(config: &Config) -> Result<SessionState> {
    let read_only = EthereumClient::new(&config.rpc_url)?;

    if let Err(e) = verify_chain(&read_only).await {
        tracing::warn!(error = %e, rpc_url = %read_only.rpc_url(), "Chain id unavailable");
    }

    let wallet: Option<Arc<dyn WalletProvider>> = match &config.private_key {
        None => None,
        Some(key) => match WalletManager::from_private_key(key) {
            Ok(manager) => Some(Arc::new(SignerWallet::new(manager, &config.rpc_url)?)),
            Err(e) => {
                tracing::error!(error = %e, "Signer could not be loaded");
                return Ok(SessionState::Disconnected { reason: e.to_string() });
            }
        },
    };

    Ok(connect(wallet, read_only, ContractAddresses::from(config)).await)
}
