//! In-flight transaction state.
//!
//! `Idle -> Submitting -> Idle | Failed`. Only one swap may be `Submitting`
//! at a time, and leaving `Submitting` is tied to dropping an [`InFlight`]
//! guard, so no exit path can leave the busy indicator stuck.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::types::SwapKind;

/// Transaction status as shown by the busy indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TxStatus {
    /// Nothing outstanding.
    #[default]
    Idle,
    /// A swap has been started and is not yet settled.
    Submitting(SwapKind),
    /// The last swap failed; a new one may be started.
    Failed(String),
}

impl TxStatus {
    /// True exactly while a swap is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, TxStatus::Submitting(_))
    }
}

/// Shared, observable [`TxStatus`].
#[derive(Clone)]
pub struct StatusTracker {
    tx: Arc<watch::Sender<TxStatus>>,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self { tx: Arc::new(watch::Sender::new(TxStatus::Idle)) }
    }

    /// Snapshot of the current status.
    pub fn current(&self) -> TxStatus {
        self.tx.borrow().clone()
    }

    /// Watch status changes.
    pub fn subscribe(&self) -> watch::Receiver<TxStatus> {
        self.tx.subscribe()
    }

    /// Move to `Submitting(kind)`, or fail if another swap is outstanding.
    ///
    /// The check and the transition happen under one lock.
    pub fn begin(&self, kind: SwapKind) -> Result<InFlight> {
        let mut accepted = false;
        self.tx.send_if_modified(|status| {
            if status.is_busy() {
                return false;
            }
            *status = TxStatus::Submitting(kind);
            accepted = true;
            true
        });

        if !accepted {
            tracing::warn!(kind = %kind, "Rejected swap: another swap is in progress");
            return Err(AppError::SwapInProgress);
        }

        Ok(InFlight { tracker: self.clone(), settled: false })
    }

    fn set(&self, status: TxStatus) {
        self.tx.send_replace(status);
    }
}

impl std::fmt::Debug for StatusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StatusTracker").field(&*self.tx.borrow()).finish()
    }
}

/// Proof that a swap is outstanding.
///
/// Dropped without [`InFlight::succeed`] or [`InFlight::fail`] (for example
/// when the awaiting task is cancelled), it returns the status to `Idle`.
#[must_use = "dropping the guard immediately ends the swap"]
pub struct InFlight {
    tracker: StatusTracker,
    settled: bool,
}

impl InFlight {
    /// The swap completed.
    pub fn succeed(mut self) {
        self.settled = true;
        self.tracker.set(TxStatus::Idle);
    }

    /// The swap failed with `err`.
    pub fn fail(mut self, err: &AppError) {
        self.settled = true;
        self.tracker.set(TxStatus::Failed(err.to_string()));
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.settled {
            self.tracker.set(TxStatus::Idle);
        }
    }
}
