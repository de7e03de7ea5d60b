//! Error types for EVM operations and their mapping onto the core taxonomy.

use alloy::contract::Error as AlloyContractError;
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError as AlloyTransportError;
use client_blockchain_core::{ContractError, TransactionId, TransportError, WalletError};
use thiserror::Error;

/// Errors that can occur while setting up the EVM client.
#[derive(Debug, Error)]
pub enum EvmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid signer key: {0}")]
    InvalidKey(String),

    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, EvmError>;

/// Map an RPC-level failure, keeping node error messages (e.g. revert reasons).
pub(crate) fn transport_error(err: AlloyTransportError) -> TransportError {
    match err.as_error_resp() {
        Some(payload) => TransportError::Reverted(payload.message.to_string()),
        None => TransportError::NetworkError(err.to_string()),
    }
}

pub(crate) fn contract_error(err: AlloyContractError) -> ContractError {
    match err {
        AlloyContractError::TransportError(inner) => match inner.as_error_resp() {
            Some(payload) => ContractError::Reverted(payload.message.to_string()),
            None => ContractError::TransportError(TransportError::NetworkError(inner.to_string())),
        },
        other => ContractError::CallFailed(other.to_string()),
    }
}

pub(crate) fn wallet_error(err: AlloyTransportError) -> WalletError {
    WalletError::Unavailable(err.to_string())
}

pub(crate) fn confirmation_error(tx: &TransactionId, err: PendingTransactionError) -> TransportError {
    match err {
        PendingTransactionError::TransportError(inner) => transport_error(inner),
        other => TransportError::ConfirmationFailed {
            tx: tx.clone(),
            reason: other.to_string(),
        },
    }
}
