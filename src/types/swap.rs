//! Swap-related types.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::ethereum::constants::{NATIVE_SYMBOL, TOKEN_SYMBOL};
use crate::types::format_ether;

/// Direction of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapKind {
    /// ETH in, token out.
    #[serde(rename = "ETH To DAI")]
    NativeToToken,
    /// Token in, ETH out.
    #[serde(rename = "DAI To ETH")]
    TokenToNative,
}

impl SwapKind {
    /// Label shown in the history table.
    pub fn label(&self) -> &'static str {
        match self {
            SwapKind::NativeToToken => "ETH To DAI",
            SwapKind::TokenToNative => "DAI To ETH",
        }
    }

    /// Symbol of the asset paid into the swap.
    pub fn input_symbol(&self) -> &'static str {
        match self {
            SwapKind::NativeToToken => NATIVE_SYMBOL,
            SwapKind::TokenToNative => TOKEN_SYMBOL,
        }
    }

    /// Human-readable amount paid into the swap, e.g. `2.0 ETH`.
    pub fn display_amount(&self, amount: U256) -> String {
        format!("{} {}", format_ether(amount), self.input_symbol())
    }
}

impl std::fmt::Display for SwapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A transaction that was included on chain with a successful status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedTx {
    /// Transaction hash.
    pub hash: B256,
    /// Sender of the transaction.
    pub from: Address,
}

/// One confirmed swap, as kept in the history.
///
/// Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Swap direction.
    #[serde(rename = "type")]
    pub kind: SwapKind,
    /// Display amount with symbol, e.g. `2.0 ETH`.
    pub value: String,
    /// Sender address.
    pub from: Address,
    /// Transaction hash.
    pub hash: B256,
    /// Local time of confirmation.
    pub time: String,
}

impl TransactionRecord {
    /// Build a record for a confirmed swap, stamped with the current local time.
    pub fn new(kind: SwapKind, amount: U256, tx: ConfirmedTx) -> Self {
        Self {
            kind,
            value: kind.display_amount(amount),
            from: tx.from,
            hash: tx.hash,
            time: local_timestamp(),
        }
    }
}

/// Current local time as `M/D/YYYY, h:mm:ss AM`.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
