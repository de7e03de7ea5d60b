//! Blockchain abstraction traits.
//!
//! This module defines a layered blockchain abstraction:
//! - Layer 0: BlockchainTransport (pure infrastructure)
//! - Layer 1: WalletConnector, NftHoldings, TokenSale (sale domain)
//! - Layer 2: IcoBlockchain (composite trait)

use async_trait::async_trait;

use crate::types::{
    Address, ChainId, TokenId, TransactionId, TransactionReceipt, U256, WalletSession,
};

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Confirmation failed for {tx}: {reason}")]
    ConfirmationFailed { tx: TransactionId, reason: String },

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// Wallet connection errors.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet connector unavailable: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),
}

/// Contract read/write errors.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Contract call reverted: {0}")]
    Reverted(String),

    #[error("Contract call failed: {0}")]
    CallFailed(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),
}

// ============================================================================
// Layer 0: Pure Infrastructure
// ============================================================================

/// Pure blockchain infrastructure layer.
///
/// This trait provides low-level operations without any sale-specific knowledge.
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
    /// Block until `tx_id` has `confirmations` blocks on top of it.
    ///
    /// There is no timeout: the call resolves when the node does.
    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        confirmations: u64,
    ) -> Result<TransactionReceipt, TransportError>;
}

// ============================================================================
// Layer 1: Sale Domain Traits
// ============================================================================

/// Wallet access: the provider/signer a user approves.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// The single network the connector is configured for.
    fn supported_chain(&self) -> ChainId;

    /// Acquire (or re-acquire) the signer and report where it points.
    ///
    /// Implementations must not validate the chain; callers compare
    /// [`WalletSession::chain_id`] against [`Self::supported_chain`].
    async fn connect(&self) -> Result<WalletSession, WalletError>;
}

/// Read surface of the ERC-721 enumerable collection.
#[async_trait]
pub trait NftHoldings: Send + Sync {
    /// Number of NFTs held by `owner`.
    async fn nft_balance_of(&self, owner: Address) -> Result<U256, ContractError>;

    /// Token id at position `index` of `owner`'s holdings.
    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<TokenId, ContractError>;
}

/// Read and write surface of the token sale (ICO) contract.
///
/// Write methods return once the transaction is accepted by the node; use
/// [`BlockchainTransport::wait_for_confirmation`] to wait for inclusion.
#[async_trait]
pub trait TokenSale: Send + Sync {
    /// Whether the NFT `token_id` has already been used to claim tokens.
    async fn token_ids_claimed(&self, token_id: TokenId) -> Result<bool, ContractError>;

    /// Minted token balance of `owner`, in base units.
    async fn balance_of(&self, owner: Address) -> Result<U256, ContractError>;

    /// Global minted supply, in base units.
    async fn total_supply(&self) -> Result<U256, ContractError>;

    /// Address allowed to withdraw the sale proceeds.
    async fn owner(&self) -> Result<Address, ContractError>;

    /// Buy `amount` whole tokens, attaching `value` wei.
    async fn mint(&self, amount: U256, value: U256) -> Result<TransactionId, ContractError>;

    /// Claim tokens for every held, unclaimed NFT.
    async fn claim(&self) -> Result<TransactionId, ContractError>;

    /// Send the contract balance to the owner. The contract enforces ownership.
    async fn withdraw(&self) -> Result<TransactionId, ContractError>;
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Everything the view-sync controller needs from a chain backend.
pub trait IcoBlockchain:
    BlockchainTransport + WalletConnector + NftHoldings + TokenSale + Send + Sync
{
    /// Backend name (e.g., "EVM", "Mock").
    fn name(&self) -> &str;

    /// Network name (e.g., "goerli", "local").
    fn network(&self) -> &str;
}
