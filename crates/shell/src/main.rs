//! cmdtask - a terminal-style task tracker
//!
//! Reads one command per line from stdin, runs it through a session and
//! prints the result. Logs go to stderr so they never mix with output.

mod config;
mod render;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmdtask_core::{CommandExecutor, Message, Output, Session, TaskStore};

use crate::config::{Config, DEFAULT_LOG_FILTER};
use crate::render::{paint, render};

const PROMPT: &str = "@cmdtask:~$";

const BANNER: &str = "cmdtask (pronounced Command-Task) is a terminal-style to-do app for developers and keyboard-first thinkers.
Type 'help' to get started or 'about' to learn more about cmdtask.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let store = Arc::new(TaskStore::new(&config.data_dir, &config.db_name));
    store
        .open()
        .await
        .with_context(|| format!("Failed to open database at {}", store.path().display()))?;

    let mut session = Session::new(CommandExecutor::new(Arc::clone(&store)));

    println!("{}", BANNER);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle_line(&line).await {
            Ok(outcome) => match outcome.output {
                Output::ClearScreen => {
                    execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                }
                Output::Refresh => {
                    let message = match store.open().await {
                        Ok(db) => Message::info(format!("Reopened database '{}'.", db.name())),
                        Err(e) => {
                            tracing::error!("Failed to reopen database: {}", e);
                            Message::danger(format!("Failed to reopen database: {}", e))
                        }
                    };
                    println!("{}", paint(&message, config.color));
                }
                output => {
                    for line in render(&output, config.color) {
                        println!("{}", line);
                    }
                }
            },
            Err(e) => {
                tracing::error!("Command failed: {}", e);
                let message = Message::danger(format!("Error: {}", e));
                println!("{}", paint(&message, config.color));
            }
        }
    }

    Ok(())
}
