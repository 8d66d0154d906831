//! Integration tests for the swap orchestrator.
//!
//! Run with: `cargo test --test test_swap_flow`

mod common;

use std::sync::Arc;

use tokio::sync::{Notify, RwLock};

use common::{approve_hash, calls, ether, offline_config, swap_hash, Mocks, ACCOUNT};
use sat_swap::{
    types::{parse_ether, SwapKind},
    AppError, HistoryStore, SwapOrchestrator, TxStatus, SWAP_CONTRACT_ADDRESS,
};

fn orchestrator(dir: &tempfile::TempDir, enforce_balance_check: bool) -> SwapOrchestrator {
    let history = HistoryStore::load(offline_config(dir).history_path);
    SwapOrchestrator::new(Arc::new(RwLock::new(history)), enforce_balance_check)
}

/// Two ETH in produces one record with the mocked hash.
#[tokio::test]
async fn test_swap_native_to_token_records_transaction() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, true);
    let (session, log) = Mocks::default().session().await;

    let amount = parse_ether("2").unwrap();
    let record = orchestrator.swap_native_to_token(&session, amount).await.unwrap();

    assert_eq!(record.kind, SwapKind::NativeToToken);
    assert_eq!(record.value, "2.0 ETH");
    assert_eq!(record.hash, swap_hash());
    assert_eq!(record.from, ACCOUNT);
    assert_eq!(serde_json::to_value(&record).unwrap()["type"], "ETH To DAI");

    assert_eq!(calls(&log), vec![format!("swap_native_to_token:{amount}")]);

    let history = orchestrator.history().read().await;
    assert_eq!(history.records(), &[record]);
    assert_eq!(orchestrator.status().current(), TxStatus::Idle);
}

/// The approval is confirmed before the swap is sent.
#[tokio::test]
async fn test_swap_token_to_native_approves_first() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, log) = Mocks::default().session().await;

    let amount = ether(3);
    let record = orchestrator.swap_token_to_native(&session, amount).await.unwrap();

    assert_eq!(
        calls(&log),
        vec![
            format!("approve:start:{SWAP_CONTRACT_ADDRESS:?}:{amount}"),
            "approve:confirmed".to_string(),
            format!("swap_token_to_native:{amount}"),
        ]
    );
    assert_eq!(record.kind, SwapKind::TokenToNative);
    assert_eq!(record.value, "3.0 DAI");
    assert_eq!(record.hash, swap_hash());
    assert_ne!(record.hash, approve_hash());
}

/// Repeated token swaps keep approve-then-swap pairs in order.
#[tokio::test]
async fn test_every_token_swap_is_preceded_by_its_approval() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, log) = Mocks::default().session().await;

    for n in 1..=3 {
        orchestrator.swap_token_to_native(&session, ether(n)).await.unwrap();
    }

    let log = calls(&log);
    assert_eq!(log.len(), 9);
    for chunk in log.chunks(3) {
        assert!(chunk[0].starts_with("approve:start"));
        assert_eq!(chunk[1], "approve:confirmed");
        assert!(chunk[2].starts_with("swap_token_to_native"));
    }
}

/// A rejected approval stops the swap and leaves no record.
#[tokio::test]
async fn test_failed_approval_skips_swap() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, log) = Mocks { fail_approve: true, ..Mocks::default() }.session().await;

    let result = orchestrator.swap_token_to_native(&session, ether(1)).await;

    assert!(matches!(result, Err(AppError::Rpc(_))));
    assert!(calls(&log).iter().all(|c| !c.starts_with("swap_")));
    assert!(orchestrator.history().read().await.is_empty());
}

/// A reverted swap clears the busy flag and records nothing.
#[tokio::test]
async fn test_failed_swap_releases_busy_flag() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, _log) = Mocks { fail_swap: true, ..Mocks::default() }.session().await;

    let result = orchestrator.swap_native_to_token(&session, ether(1)).await;

    assert!(matches!(result, Err(AppError::Reverted(_))));
    let status = orchestrator.status().current();
    assert!(!status.is_busy());
    assert!(matches!(status, TxStatus::Failed(_)));
    assert!(orchestrator.history().read().await.is_empty());

    // The next attempt is accepted.
    let (session, _log) = Mocks::default().session().await;
    assert!(orchestrator.swap_native_to_token(&session, ether(1)).await.is_ok());
}

/// A second swap is rejected while the first one is outstanding.
#[tokio::test]
async fn test_concurrent_swap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let gate = Arc::new(Notify::new());
    let (session, log) = Mocks { gate: Some(gate.clone()), ..Mocks::default() }.session().await;

    let mut status = orchestrator.status().subscribe();
    let first = {
        let orchestrator = orchestrator.clone();
        let session = session.clone();
        tokio::spawn(async move { orchestrator.swap_native_to_token(&session, ether(1)).await })
    };

    status.wait_for(|s| s.is_busy()).await.unwrap();

    let second = orchestrator.swap_token_to_native(&session, ether(1)).await;
    assert!(matches!(second, Err(AppError::SwapInProgress)));

    gate.notify_one();
    let record = first.await.unwrap().unwrap();

    assert_eq!(record.kind, SwapKind::NativeToToken);
    assert_eq!(calls(&log).len(), 1);
    assert_eq!(orchestrator.history().read().await.len(), 1);
    assert_eq!(orchestrator.status().current(), TxStatus::Idle);
}

/// Cancelling an outstanding swap does not leave the client busy.
#[tokio::test]
async fn test_cancelled_swap_returns_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let gate = Arc::new(Notify::new());
    let (session, _log) = Mocks { gate: Some(gate), ..Mocks::default() }.session().await;

    let mut status = orchestrator.status().subscribe();
    let task = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.swap_native_to_token(&session, ether(1)).await })
    };
    status.wait_for(|s| s.is_busy()).await.unwrap();

    task.abort();
    let _ = task.await;

    assert_eq!(orchestrator.status().current(), TxStatus::Idle);
    assert!(orchestrator.history().read().await.is_empty());
}

/// Amounts above the native balance never reach the contract.
#[tokio::test]
async fn test_native_swap_above_balance_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, true);
    let (session, log) =
        Mocks { native_balance: Some(ether(1)), ..Mocks::default() }.session().await;

    let result = orchestrator.swap_native_to_token(&session, ether(2)).await;

    match result {
        Err(AppError::InsufficientBalance { required, available }) => {
            assert_eq!(required, "2.0");
            assert_eq!(available, "1.0");
        }
        other => panic!("Expected InsufficientBalance, got {other:?}"),
    }
    assert!(calls(&log).is_empty());
    assert!(matches!(orchestrator.status().current(), TxStatus::Failed(_)));
}

/// Token swaps are checked against the token balance, before any approval.
#[tokio::test]
async fn test_token_swap_above_token_balance_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, true);
    let (session, log) =
        Mocks { token_balance: Some(ether(1)), ..Mocks::default() }.session().await;

    let result = orchestrator.swap_token_to_native(&session, ether(5)).await;

    assert!(matches!(result, Err(AppError::InsufficientBalance { .. })));
    assert_eq!(calls(&log), vec![format!("balance_of:{ACCOUNT:?}")]);
}

/// With the check disabled, the contract decides.
#[tokio::test]
async fn test_balance_check_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, _log) =
        Mocks { native_balance: Some(ether(1)), ..Mocks::default() }.session().await;

    assert!(orchestrator.swap_native_to_token(&session, ether(2)).await.is_ok());
}

/// Confirmed swaps reach the history file.
#[tokio::test]
async fn test_records_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = orchestrator(&dir, false);
    let (session, _log) = Mocks::default().session().await;

    let first = orchestrator.swap_native_to_token(&session, ether(1)).await.unwrap();
    let second = orchestrator.swap_token_to_native(&session, ether(2)).await.unwrap();

    let reloaded = HistoryStore::load(offline_config(&dir).history_path);
    assert_eq!(reloaded.records(), &[first, second]);
}
