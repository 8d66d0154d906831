//! Terminal presentation.
//!
//! [`render`] is a pure function of the session, history, UI state and
//! transaction status. User input arrives as [`Command`]s.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use alloy::primitives::{B256, U256};

use crate::{
    error::{AppError, Result},
    ethereum::constants::{NATIVE_SYMBOL, TOKEN_SYMBOL},
    services::TxStatus,
    session::SessionState,
    types::{format_ether, parse_ether, TransactionRecord},
};

const TITLE: &str = "S.A.T SWAP";
const RULE: &str = "------------------------------------------------------------";

/// Ephemeral front-end state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    input: String,
    show_history: bool,
}

impl UiState {
    /// Current contents of the amount field.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the amount field. Only values [`UiState::amount`] can convert
    /// are accepted; anything else leaves the field unchanged.
    pub fn set_input(&mut self, raw: &str) -> Result<()> {
        let raw = raw.trim();
        parse_ether(raw)?;
        self.input = raw.to_string();
        Ok(())
    }

    /// The amount field in wei.
    pub fn amount(&self) -> Result<U256> {
        parse_ether(&self.input)
    }

    /// Whether the history table is expanded.
    pub fn show_history(&self) -> bool {
        self.show_history
    }

    /// Expand or collapse the history table; returns the new visibility.
    pub fn toggle_history(&mut self) -> bool {
        self.show_history = !self.show_history;
        self.show_history
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the amount field.
    SetAmount(String),
    /// Swap the amount from ETH to the token.
    SwapNativeToToken,
    /// Swap the amount from the token to ETH.
    SwapTokenToNative,
    /// Expand or collapse the history table.
    ToggleHistory,
    /// Reconnect and re-read the balance.
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(AppError::Parse("Empty command".to_string()));
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("amount", [value]) => Command::SetAmount(value.to_string()),
            ("amount", _) => {
                return Err(AppError::Parse("Usage: amount <value>".to_string()));
            }
            ("buy", []) => Command::SwapNativeToToken,
            ("sell", []) => Command::SwapTokenToNative,
            ("history", []) => Command::ToggleHistory,
            ("refresh", []) => Command::Refresh,
            ("help", []) | ("?", []) => Command::Help,
            ("quit", []) | ("exit", []) => Command::Quit,
            (value, []) if value.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                Command::SetAmount(value.to_string())
            }
            _ => return Err(AppError::Parse(format!("Unknown command: {}", line.trim()))),
        };

        Ok(command)
    }
}

/// Help text listing every command.
pub fn help() -> String {
    format!(
        "Commands:\n  amount <n>  set the amount (or just type the number)\n  buy         swap from {NATIVE_SYMBOL} to {TOKEN_SYMBOL}\n  sell        swap from {TOKEN_SYMBOL} to {NATIVE_SYMBOL}\n  history     show/hide transaction details\n  refresh     reconnect and reload the balance\n  quit        exit\n"
    )
}

/// Explorer page of a transaction.
pub fn explorer_tx_url(explorer_url: &str, hash: &B256) -> String {
    format!("{}/tx/{:?}", explorer_url.trim_end_matches('/'), hash)
}

/// Everything the view is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub session: &'a SessionState,
    pub history: &'a [TransactionRecord],
    pub ui: &'a UiState,
    pub status: &'a TxStatus,
    pub explorer_url: &'a str,
}

/// Render the whole screen.
pub fn render(view: &View<'_>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_screen(&mut out, view);
    out
}

fn write_screen(out: &mut String, view: &View<'_>) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    match view.session {
        SessionState::Connected(session) => {
            writeln!(out, "Connected through account : {:?}", session.account())?;
            writeln!(out, "With Balance : {} {NATIVE_SYMBOL}", format_ether(session.balance()))?;
        }
        SessionState::ReadOnly(_) => writeln!(out, "No wallet connected (read-only)")?,
        SessionState::Disconnected { reason } => {
            writeln!(out, "Wallet connection failed: {reason}")?;
        }
    }

    match view.status {
        TxStatus::Submitting(kind) => writeln!(out, "[ waiting for confirmation: {kind} ... ]")?,
        TxStatus::Failed(reason) => writeln!(out, "Last swap failed: {reason}")?,
        TxStatus::Idle => {}
    }

    writeln!(out)?;
    let amount = if view.ui.input().is_empty() { "(Amount of Tokens)" } else { view.ui.input() };
    writeln!(out, "Amount: {amount}")?;
    writeln!(out, "  [buy]  Swap From {NATIVE_SYMBOL} to {TOKEN_SYMBOL}")?;
    writeln!(out, "  [sell] Swap from {TOKEN_SYMBOL} to {NATIVE_SYMBOL}")?;
    writeln!(out, "{RULE}")?;

    if view.history.is_empty() {
        return writeln!(out, "No Transactions Yet");
    }

    let arrow = if view.ui.show_history() { "v" } else { ">" };
    writeln!(out, "{arrow} Transaction Details ({})", view.history.len())?;
    if view.ui.show_history() {
        write_table(out, view.history, view.explorer_url)?;
    }

    Ok(())
}

fn write_table(out: &mut String, history: &[TransactionRecord], explorer_url: &str) -> fmt::Result {
    writeln!(out, "{:<11} {:<14} {:<42} {:<24} Hash", "Type", "Value", "From", "Time")?;
    for record in history {
        writeln!(
            out,
            "{:<11} {:<14} {:<42} {:<24} {}",
            record.kind.label(),
            record.value,
            format!("{:?}", record.from),
            record.time,
            explorer_tx_url(explorer_url, &record.hash)
        )?;
    }
    Ok(())
}
