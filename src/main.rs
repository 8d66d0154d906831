//! S.A.T Swap
//!
//! Terminal front-end: reads commands from stdin and re-renders after each.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sat_swap::{session, ui, App, Config, Flow, HistoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging; stdout is reserved for the rendered screen
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Starting S.A.T Swap");

    let history = HistoryStore::load(&config.history_path);
    let state = session::bootstrap(&config).await?;
    let mut app = App::new(config, state, history);

    println!("{}", app.render().await);
    println!("{}", ui::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ui::Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if command == ui::Command::Help {
            println!("{}", ui::help());
            continue;
        }

        match app.handle(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("{e}"),
        }

        println!("{}", app.render().await);
    }

    app.shutdown().await;
    tracing::info!("S.A.T Swap stopped");

    Ok(())
}
