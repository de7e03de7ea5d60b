//! Glue code tying the sync worker handle and the terminal UI together.
use anyhow::Result;
use async_trait::async_trait;

use crate::config::CliConfig;
use crate::presentation::{CliEventConsumer, EventLoop, terminal};
use client_frontend_core::{
    Frontend, FrontendConfig, SyncCommand, SyncHandle, message::MessageLog,
};

/// Terminal frontend for the token sale.
///
/// Pure UI layer: it receives a [`SyncHandle`] and never owns the controller.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: SyncHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        let mut messages = MessageLog::new(self.frontend_config.messages.capacity);
        messages.push_info("Welcome to Crypto Devs ICO!");
        let consumer = CliEventConsumer::new(messages);

        // Subscribe before the first command so no event is missed.
        let event_loop = EventLoop::new(
            handle.clone(),
            consumer,
            self.frontend_config.sale.clone(),
            self.cli_config.clone(),
        );

        // Page-load flow: connect, then read everything.
        handle.send(SyncCommand::Initialize).await?;

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let _consumer = event_loop.run(&mut terminal).await?;

        tracing::info!("CLI frontend exiting");

        Ok(())
    }
}
