//! Application state and command handling.
//!
//! Holds the session, history and UI state explicitly and updates them only
//! through [`App::handle`]. Swaps run as spawned tasks so commands keep being
//! processed while a transaction waits for confirmation.

use std::sync::Arc;

use tokio::{
    sync::RwLock,
    task::{JoinHandle, JoinSet},
};

use crate::{
    config::Config,
    error::{AppError, Result},
    history::HistoryStore,
    services::SwapOrchestrator,
    session::{self, SessionState},
    types::{SwapKind, TransactionRecord},
    ui::{self, Command, UiState, View},
};

/// What the command loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The running client.
pub struct App {
    config: Config,
    session: Arc<RwLock<SessionState>>,
    orchestrator: SwapOrchestrator,
    ui: UiState,
    tasks: JoinSet<()>,
}

impl App {
    /// Assemble the client from a bootstrapped session and a loaded history.
    pub fn new(config: Config, session: SessionState, history: HistoryStore) -> Self {
        let orchestrator =
            SwapOrchestrator::new(Arc::new(RwLock::new(history)), config.enforce_balance_check);

        Self {
            config,
            session: Arc::new(RwLock::new(session)),
            orchestrator,
            ui: UiState::default(),
            tasks: JoinSet::new(),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn orchestrator(&self) -> &SwapOrchestrator {
        &self.orchestrator
    }

    /// Snapshot of the session state.
    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    /// Apply one command. Errors are meant to be shown to the user; none of
    /// them leave the application in a different state than before.
    pub async fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::SetAmount(raw) => self.ui.set_input(&raw)?,
            Command::ToggleHistory => {
                self.ui.toggle_history();
            }
            Command::SwapNativeToToken => {
                let handle = self.submit(SwapKind::NativeToToken).await?;
                self.track(SwapKind::NativeToToken, handle);
            }
            Command::SwapTokenToNative => {
                let handle = self.submit(SwapKind::TokenToNative).await?;
                self.track(SwapKind::TokenToNative, handle);
            }
            Command::Refresh => self.refresh().await?,
            Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Start a swap of the current amount in the background.
    ///
    /// Fails immediately when there is no signer, the amount is unusable, or
    /// a swap is already outstanding. On success the status is `Submitting`
    /// before this returns; the task resolves with the recorded transaction.
    pub async fn submit(&self, kind: SwapKind) -> Result<JoinHandle<Result<TransactionRecord>>> {
        let session = self.session.read().await.session().cloned().ok_or(AppError::ReadOnly)?;
        let amount = self.ui.amount()?;
        let in_flight = self.orchestrator.status().begin(kind)?;

        let orchestrator = self.orchestrator.clone();
        let shared_session = self.session.clone();

        Ok(tokio::spawn(async move {
            let record = orchestrator.swap_in_flight(in_flight, &session, kind, amount).await?;

            match session.refresh().await {
                Ok(fresh) => *shared_session.write().await = SessionState::Connected(fresh),
                Err(e) => tracing::warn!(error = %e, "Balance refresh after swap failed"),
            }

            Ok::<_, AppError>(record)
        }))
    }

    fn track(&mut self, kind: SwapKind, handle: JoinHandle<Result<TransactionRecord>>) {
        self.tasks.spawn(async move {
            match handle.await {
                Ok(Ok(record)) => {
                    tracing::debug!(kind = %kind, tx_hash = %record.hash, "Swap task finished");
                }
                Ok(Err(e)) => tracing::warn!(kind = %kind, error = %e, "Swap did not complete"),
                Err(e) => tracing::error!(kind = %kind, error = %e, "Swap task aborted"),
            }
        });
    }

    /// Reload the session: a connected one is refreshed in place, otherwise
    /// bootstrapping starts over.
    pub async fn refresh(&self) -> Result<()> {
        let current = self.session.read().await.session().cloned();

        let next = match current {
            Some(session) => match session.refresh().await {
                Ok(fresh) => SessionState::Connected(fresh),
                Err(e) => {
                    tracing::error!(error = %e, "Loading account failed");
                    SessionState::Disconnected { reason: e.to_string() }
                }
            },
            None => session::bootstrap(&self.config).await?,
        };

        *self.session.write().await = next;
        Ok(())
    }

    /// Render the current screen.
    pub async fn render(&self) -> String {
        let session = self.session.read().await;
        let history = self.orchestrator.history().read().await;
        let status = self.orchestrator.status().current();

        ui::render(&View {
            session: &*session,
            history: history.records(),
            ui: &self.ui,
            status: &status,
            explorer_url: &self.config.explorer_url,
        })
    }

    /// Wait for outstanding swaps to settle.
    pub async fn shutdown(&mut self) {
        if !self.tasks.is_empty() {
            tracing::info!(pending = self.tasks.len(), "Waiting for outstanding swaps");
        }
        while self.tasks.join_next().await.is_some() {}
    }
}
