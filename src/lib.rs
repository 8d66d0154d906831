//! S.A.T Swap
//!
//! A terminal client for swapping ETH and an ERC-20 token through a pair of
//! deployed contracts.
//!
//! # Features
//!
//! - **Session bootstrap**: connects a signing key, or falls back to a
//!   read-only connection when none is configured
//! - **Swaps**: ETH to token, and token to ETH behind an awaited approval
//! - **History**: every confirmed swap is kept in a JSON file across restarts
//!
//! # Example
//!
//! ```rust,ignore
//! use sat_swap::{session, App, Config, HistoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = session::bootstrap(&config).await?;
//!     let history = HistoryStore::load(&config.history_path);
//!     let app = App::new(config, state, history);
//!     println!("{}", app.render().await);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod bindings;
pub mod config;
pub mod error;
pub mod ethereum;
pub mod history;
pub mod services;
pub mod session;
pub mod types;
pub mod ui;

pub use app::{App, Flow};
pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::constants::*;
pub use history::HistoryStore;
pub use services::{SwapOrchestrator, TxStatus};
pub use session::{Session, SessionState};
