//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::env;
use std::path::PathBuf;

use alloy::primitives::Address;

use crate::error::AppError;
use crate::ethereum::constants::{
    DEFAULT_EXPLORER_URL, DEFAULT_HISTORY_PATH, DEFAULT_RPC_URL, SWAP_CONTRACT_ADDRESS,
    TOKEN_CONTRACT_ADDRESS,
};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key for signing (hex string). `None` means read-only mode.
    pub private_key: Option<String>,
    /// Swap contract address.
    pub swap_contract: Address,
    /// Token contract address.
    pub token_contract: Address,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// Path of the persisted transaction history.
    pub history_path: PathBuf,
    /// Reject swaps that exceed the account's balance before submitting.
    pub enforce_balance_check: bool,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            private_key: None,
            swap_contract: SWAP_CONTRACT_ADDRESS,
            token_contract: TOKEN_CONTRACT_ADDRESS,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            enforce_balance_check: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SWAP_RPC_URL`: Ethereum JSON-RPC endpoint
    /// - `SWAP_PRIVATE_KEY`: signing key; without it the client runs read-only
    /// - `SWAP_CONTRACT_ADDRESS` / `TOKEN_CONTRACT_ADDRESS`: deployed contracts
    /// - `SWAP_EXPLORER_URL`: block explorer base URL
    /// - `SWAP_HISTORY_PATH`: history file location
    /// - `SWAP_ENFORCE_BALANCE`: `true`/`false` (default: true)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let rpc_url = env::var("SWAP_RPC_URL").unwrap_or(defaults.rpc_url);

        let private_key = env::var("SWAP_PRIVATE_KEY").ok().filter(|k| !k.trim().is_empty());

        let swap_contract = match env::var("SWAP_CONTRACT_ADDRESS") {
            Ok(raw) => parse_address_var("SWAP_CONTRACT_ADDRESS", &raw)?,
            Err(_) => defaults.swap_contract,
        };

        let token_contract = match env::var("TOKEN_CONTRACT_ADDRESS") {
            Ok(raw) => parse_address_var("TOKEN_CONTRACT_ADDRESS", &raw)?,
            Err(_) => defaults.token_contract,
        };

        let explorer_url = env::var("SWAP_EXPLORER_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.explorer_url);

        let history_path =
            env::var("SWAP_HISTORY_PATH").map(PathBuf::from).unwrap_or(defaults.history_path);

        let enforce_balance_check = match env::var("SWAP_ENFORCE_BALANCE") {
            Ok(raw) => parse_bool_var("SWAP_ENFORCE_BALANCE", &raw)?,
            Err(_) => defaults.enforce_balance_check,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            rpc_url,
            private_key,
            swap_contract,
            token_contract,
            explorer_url,
            history_path,
            enforce_balance_check,
            log_level,
        })
    }
}

fn parse_address_var(name: &str, raw: &str) -> Result<Address, AppError> {
    raw.trim().parse().map_err(|_| AppError::Config(format!("{name} is not a valid address: {raw}")))
}

fn parse_bool_var(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!("{name} must be true or false, got {raw}"))),
    }
}
