//! Common utilities for integration tests.
//!
//! Mock contracts append to a shared call log so tests can assert the order
//! in which the orchestrator reached them.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use sat_swap::{
    bindings::{ContractAddresses, ContractPair, SwapContract, TokenContract},
    session::{Session, WalletProvider},
    types::ConfirmedTx,
    AppError, Config, Result, SWAP_CONTRACT_ADDRESS, TOKEN_CONTRACT_ADDRESS,
};

/// First Hardhat development account.
pub const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

/// Hash every mocked swap confirms with.
pub fn swap_hash() -> B256 {
    B256::repeat_byte(0x5a)
}

/// Hash every mocked approval confirms with.
pub fn approve_hash() -> B256 {
    B256::repeat_byte(0xa9)
}

pub fn ether(n: u128) -> U256 {
    U256::from(n * ONE_ETHER)
}

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Swap contract double.
pub struct MockSwap {
    pub log: CallLog,
    pub fail: bool,
    /// When set, swaps wait for a notification before confirming.
    pub gate: Option<Arc<Notify>>,
}

#[async_trait]
impl SwapContract for MockSwap {
    fn address(&self) -> Address {
        SWAP_CONTRACT_ADDRESS
    }

    async fn swap_native_to_token(&self, amount: U256) -> Result<ConfirmedTx> {
        self.confirm(format!("swap_native_to_token:{amount}")).await
    }

    async fn swap_token_to_native(&self, amount: U256) -> Result<ConfirmedTx> {
        self.confirm(format!("swap_token_to_native:{amount}")).await
    }
}

impl MockSwap {
    async fn confirm(&self, call: String) -> Result<ConfirmedTx> {
        self.log.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(AppError::Reverted(swap_hash()));
        }
        Ok(ConfirmedTx { hash: swap_hash(), from: ACCOUNT })
    }
}

/// Token contract double. Approvals take a little while to be mined.
pub struct MockToken {
    pub log: CallLog,
    pub balance: U256,
    pub fail_approve: bool,
}

#[async_trait]
impl TokenContract for MockToken {
    fn address(&self) -> Address {
        TOKEN_CONTRACT_ADDRESS
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<ConfirmedTx> {
        self.log.lock().unwrap().push(format!("approve:start:{spender:?}:{amount}"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail_approve {
            return Err(AppError::Rpc("user rejected".to_string()));
        }
        self.log.lock().unwrap().push("approve:confirmed".to_string());
        Ok(ConfirmedTx { hash: approve_hash(), from: ACCOUNT })
    }

    async fn balance_of(&self, account: Address) -> Result<U256> {
        self.log.lock().unwrap().push(format!("balance_of:{account:?}"));
        Ok(self.balance)
    }
}

/// Wallet double handing out a fixed contract pair.
pub struct MockWallet {
    pub balance: U256,
    pub fail: bool,
    pub contracts: ContractPair,
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn address(&self) -> Address {
        ACCOUNT
    }

    async fn native_balance(&self) -> Result<U256> {
        if self.fail {
            return Err(AppError::Wallet("user rejected the connection".to_string()));
        }
        Ok(self.balance)
    }

    fn bind_contracts(&self, _addresses: ContractAddresses) -> ContractPair {
        self.contracts.clone()
    }
}

/// Knobs for a mocked contract pair.
#[derive(Default)]
pub struct Mocks {
    pub native_balance: Option<U256>,
    pub token_balance: Option<U256>,
    pub fail_swap: bool,
    pub fail_approve: bool,
    pub gate: Option<Arc<Notify>>,
}

impl Mocks {
    /// Build the wallet and the log its contracts write to.
    pub fn wallet(self) -> (Arc<MockWallet>, CallLog) {
        let log = CallLog::default();
        let contracts = ContractPair {
            swap: Arc::new(MockSwap { log: log.clone(), fail: self.fail_swap, gate: self.gate }),
            token: Arc::new(MockToken {
                log: log.clone(),
                balance: self.token_balance.unwrap_or(ether(100)),
                fail_approve: self.fail_approve,
            }),
        };
        let wallet = MockWallet {
            balance: self.native_balance.unwrap_or(ether(100)),
            fail: false,
            contracts,
        };
        (Arc::new(wallet), log)
    }

    /// Open a session over the mocked pair.
    pub async fn session(self) -> (Session, CallLog) {
        let (wallet, log) = self.wallet();
        let session = Session::open(wallet, ContractAddresses::from(&Config::default()))
            .await
            .expect("mock session opens");
        (session, log)
    }
}

/// Config pointing at an unreachable node and a private history file.
pub fn offline_config(dir: &tempfile::TempDir) -> Config {
    Config {
        rpc_url: "http://127.0.0.1:1".to_string(),
        history_path: dir.path().join("transactionDetails.json"),
        ..Config::default()
    }
}
