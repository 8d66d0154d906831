//! Signing key management.
//!
//! A loaded key plays the part of an injected wallet: it supplies the active
//! account and signs every transaction sent through the provider it builds.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use crate::error::{AppError, Result};

/// Wallet manager for transaction signing.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse()?;
        let address = signer.address();

        tracing::info!(address = %address, "Signer loaded");

        Ok(Self { signer, address })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Build a provider that fills, signs and submits transactions as this wallet.
    ///
    /// No network call is made here.
    pub fn connect(&self, rpc_url: &str) -> Result<DynProvider> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let wallet = EthereumWallet::from(self.signer.clone());

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();

        Ok(provider)
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}
