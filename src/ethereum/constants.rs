//! Ethereum network constants.
//!
//! Contains chain IDs, deployed contract addresses and explorer defaults.

use alloy::primitives::{address, Address};

// ============================================================================
// Chain IDs
// ============================================================================

/// Goerli testnet chain ID.
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Default chain ID (Goerli, where the swap pair is deployed).
pub const DEFAULT_CHAIN_ID: u64 = GOERLI_CHAIN_ID;

// ============================================================================
// Deployed Contracts (Goerli)
// ============================================================================

/// ETH/DAI swap contract.
pub const SWAP_CONTRACT_ADDRESS: Address = address!("1c4f87766Ae322A5c9Ccbd8FDa1774a1c63C8f34");

/// DAI token contract traded by the swap contract.
pub const TOKEN_CONTRACT_ADDRESS: Address = address!("11fE4B6AE13d2a6055C8D9cF65c55bac32B5d844");

// ============================================================================
// Endpoints
// ============================================================================

/// Public read-only RPC used when no endpoint is configured.
pub const DEFAULT_RPC_URL: &str = "https://ethereum-goerli-rpc.publicnode.com";

/// Block explorer base URL; transactions live under `<base>/tx/<hash>`.
pub const DEFAULT_EXPLORER_URL: &str = "https://goerli.etherscan.io";

/// File holding the serialized transaction history.
pub const DEFAULT_HISTORY_PATH: &str = "transactionDetails.json";

// ============================================================================
// Units
// ============================================================================

/// Decimals of both ETH and the swap token.
pub const ETHER_DECIMALS: u8 = 18;

/// Display symbol of the native currency.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Display symbol of the swapped token.
pub const TOKEN_SYMBOL: &str = "DAI";
