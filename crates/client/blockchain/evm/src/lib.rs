//! EVM blockchain integration for the Crypto Devs ICO client.
//!
//! This crate implements the `client-blockchain-core` traits on top of an
//! HTTP JSON-RPC node using `alloy`:
//! - Local private-key signer acting as the wallet
//! - `sol!` bindings for the NFT and token-sale contracts
//! - Confirmation waits through pending-transaction watchers
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_evm::{EvmBlockchainClient, EvmConfig};
//! use client_blockchain_core::TokenSale;
//!
//! let config = EvmConfig::from_env()?;
//! let client = EvmBlockchainClient::new(config)?;
//! let supply = client.total_supply().await?;
//! ```

pub mod client;
pub mod config;
pub mod contracts;
pub mod error;

pub use client::EvmBlockchainClient;
pub use config::{EvmConfig, EvmNetwork};
pub use error::EvmError;
