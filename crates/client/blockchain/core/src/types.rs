//! Common types for blockchain interactions.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use alloy_primitives::{Address, U256};

/// NFT token identifier as stored by the ERC-721 contract.
pub type TokenId = U256;

/// EIP-155 chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const MAINNET: ChainId = ChainId(1);
    pub const GOERLI: ChainId = ChainId(5);
    pub const SEPOLIA: ChainId = ChainId(11_155_111);
    pub const LOCAL: ChainId = ChainId(31_337);
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic transaction identifier (32-byte transaction hash on EVM chains).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Transaction status on the blockchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Transaction is confirmed on-chain
    Confirmed { block_height: u64 },

    /// Transaction was mined but reverted
    Failed { error: String },
}

/// Receipt returned once a transaction reached the requested confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction hash
    pub transaction_id: TransactionId,

    /// Final status
    pub status: TransactionStatus,

    /// Gas consumed by execution
    pub gas_used: u64,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TransactionStatus::Confirmed { .. })
    }
}

/// Account and network bound by a successful wallet connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Signer address used for reads scoped to the caller and for writes
    pub address: Address,

    /// Chain the wallet is currently pointed at
    pub chain_id: ChainId,
}

/// Blockchain-specific configuration.
///
/// This is a trait to allow different blockchains to provide their own config types.
pub trait BlockchainConfig: Send + Sync {
    /// Human-readable network name (e.g., "goerli", "sepolia")
    fn network_name(&self) -> &str;

    /// RPC endpoint URL
    fn rpc_url(&self) -> &str;

    /// The only chain this configuration accepts
    fn chain_id(&self) -> ChainId;

    /// Validate configuration (e.g., URL format, contract addresses)
    fn validate(&self) -> Result<(), String>;
}
