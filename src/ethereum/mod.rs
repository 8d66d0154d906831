//! Ethereum interaction module.
//!
//! Contains the read-only client, signing wallet, and contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod wallet;

pub use client::{EthereumClient, HttpProvider};
pub use wallet::WalletManager;
