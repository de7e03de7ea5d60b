//! Client builder with dependency injection pattern.

use std::sync::Arc;

use crate::{Client, Frontend};
use anyhow::{Context, Result};
use client_blockchain_core::IcoBlockchain;
use client_frontend_core::FrontendConfig;

/// Builder for constructing a Client with proper validation.
///
/// - **Required fields**: Blockchain and Frontend must be provided
/// - **Optional fields**: Frontend configuration (defaults otherwise)
/// - **Fail-fast validation**: Missing required fields cause build() to fail
#[derive(Default)]
pub struct ClientBuilder {
    blockchain: Option<Arc<dyn IcoBlockchain>>,
    frontend: Option<Box<dyn Frontend>>,
    config: Option<FrontendConfig>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain backend (required).
    pub fn blockchain(mut self, client: impl IcoBlockchain + 'static) -> Self {
        self.blockchain = Some(Arc::new(client));
        self
    }

    /// Set the frontend (required).
    ///
    /// The frontend handles UI rendering and user input. It receives a
    /// SyncHandle for communication with the controller.
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Set sale, channel and confirmation settings.
    pub fn config(mut self, config: FrontendConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the blockchain or the frontend is not set.
    pub fn build(self) -> Result<Client> {
        let blockchain = self
            .blockchain
            .context("Blockchain is required. Use .blockchain() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client {
            blockchain,
            frontend,
            config: self.config.unwrap_or_default(),
        })
    }
}
