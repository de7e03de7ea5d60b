//! Top-level client wiring a chain backend, the sync worker, and a frontend.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Blockchain (IcoBlockchain backend - EVM, mock)
//!   ├─→ SyncWorker (owns the ViewSync controller)
//!   └─→ Frontend (UI layer, talks to the worker via SyncHandle)
//! ```
//!
//! The frontend never sees the backend directly; everything goes through the
//! worker so remote calls stay sequential.

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use std::sync::Arc;

use anyhow::Result;
use client_blockchain_core::IcoBlockchain;
use client_frontend_core::{FrontendConfig, SyncWorker, ViewSync};

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` collects the backend, frontend and configuration
/// 2. `Client::run()` spawns the sync worker around a fresh controller
/// 3. Control passes to the frontend until the user quits
/// 4. The worker is stopped on frontend exit
pub struct Client {
    blockchain: Arc<dyn IcoBlockchain>,
    frontend: Box<dyn Frontend>,
    config: FrontendConfig,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the client until the frontend returns.
    ///
    /// # Errors
    ///
    /// Returns the frontend's error, if any. Remote failures never surface
    /// here; the controller absorbs them.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            backend = self.blockchain.name(),
            network = self.blockchain.network(),
            "starting sale client"
        );

        let controller = ViewSync::new(
            self.blockchain,
            self.config.sale.clone(),
            self.config.sync.clone(),
            self.config.channels.event_buffer,
        );
        let (handle, worker_task) =
            SyncWorker::spawn(controller, self.config.channels.command_buffer);

        // Run frontend (blocks until user quits)
        let mut frontend = self.frontend;
        let frontend_result = frontend.run(handle).await;

        // Cleanup worker
        worker_task.abort();
        let _ = worker_task.await;

        frontend_result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_blockchain_core::{MockIcoChain, U256};
    use client_frontend_core::{SyncCommand, SyncEvent, SyncHandle, ViewState};
    use tokio::sync::oneshot;

    use super::*;

    /// Frontend that loads the page, buys two tokens and reports the result.
    struct ScriptedFrontend {
        report: Option<oneshot::Sender<ViewState>>,
    }

    #[async_trait]
    impl Frontend for ScriptedFrontend {
        async fn run(&mut self, handle: SyncHandle) -> Result<()> {
            let mut events = handle.subscribe();
            handle.send(SyncCommand::Initialize).await?;
            handle.send(SyncCommand::Mint(U256::from(2))).await?;

            let mut finished = 0;
            while finished < 2 {
                if let SyncEvent::ActionFinished { .. } = events.recv().await? {
                    finished += 1;
                }
            }

            if let Some(report) = self.report.take() {
                let _ = report.send(handle.state());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn runs_frontend_against_worker() {
        let chain = MockIcoChain::new();
        let (tx, rx) = oneshot::channel();

        let client = Client::builder()
            .blockchain(chain.clone())
            .frontend(ScriptedFrontend { report: Some(tx) })
            .build()
            .unwrap();

        tokio::time::timeout(Duration::from_secs(5), client.run())
            .await
            .expect("client should finish")
            .unwrap();

        let state = rx.await.unwrap();
        assert!(state.wallet_connected);
        assert!(state.is_owner);
        assert_eq!(
            chain.submitted_mints(),
            vec![(U256::from(2), U256::from(2_000_000_000_000_000u64))]
        );
    }
}
