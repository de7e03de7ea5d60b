//! Blockchain abstraction layer for the Crypto Devs ICO client.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: IcoBlockchain (composite trait)
//!          ├── WalletConnector
//!          ├── NftHoldings
//!          └── TokenSale
//!
//! Layer 1: Domain Traits (wallet, NFT collection, token sale)
//!
//! Layer 0: BlockchainTransport (chain id, confirmations)
//! ```
//!
//! # Design Philosophy
//!
//! - **Layer 0 (Transport)**: Pure blockchain operations, no sale knowledge
//! - **Layer 1 (Domain)**: One trait per external collaborator
//! - **Layer 2 (Composite)**: Complete backend interface consumed by the frontend
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{IcoBlockchain, WalletConnector, TokenSale};
//!
//! async fn supply(chain: &dyn IcoBlockchain) -> Result<U256, ContractError> {
//!     let session = chain.connect().await?;
//!     chain.total_supply().await
//! }
//! ```

pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export all traits
pub use traits::{
    BlockchainTransport, ContractError, IcoBlockchain, NftHoldings, TokenSale, TransportError,
    WalletConnector, WalletError,
};

// Re-export all types
pub use types::{
    Address, BlockchainConfig, ChainId, TokenId, TransactionId, TransactionReceipt,
    TransactionStatus, U256, WalletSession,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockIcoChain};
