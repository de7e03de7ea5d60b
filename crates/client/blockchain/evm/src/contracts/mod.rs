//! Solidity bindings for the two deployed contracts.
//!
//! Only the functions the client calls are declared; the rest of each ABI is
//! irrelevant here.

pub mod crypto_devs;
pub mod ico;

pub use crypto_devs::ICryptoDevs;
pub use ico::ICryptoDevToken;
