//! Interactive console loop.
//!
//! Reads one command per line from stdin, dispatches it, and prints the
//! reply. Ctrl-C or `quit` ends the session; background timers keep running
//! until the loop exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::dispatch;
use crate::tools::Toolbox;

pub struct ConsoleService {
    toolbox: Arc<Toolbox>,
}

impl ConsoleService {
    pub fn new(toolbox: Arc<Toolbox>) -> Self {
        Self { toolbox }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("Console ready — type 'help' for commands");
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("stdin closed, shutting down");
                        break;
                    };

                    let trimmed = line.trim();
                    if matches!(trimmed, "quit" | "exit") {
                        break;
                    }

                    if !trimmed.is_empty() {
                        let reply = dispatch::dispatch(&self.toolbox, trimmed).await;
                        stdout.write_all(reply.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                    }
                    stdout.write_all(b"> ").await?;
                    stdout.flush().await?;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}
