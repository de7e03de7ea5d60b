//! EVM network and contract configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use client_blockchain_core::{BlockchainConfig, ChainId};
use strum::{Display, EnumString, IntoStaticStr};

/// Contract addresses baked in at build time, overridable at runtime.
const DEFAULT_NFT_CONTRACT: Option<&str> = option_env!("ICO_NFT_CONTRACT_ADDRESS");
const DEFAULT_ICO_CONTRACT: Option<&str> = option_env!("ICO_TOKEN_CONTRACT_ADDRESS");

/// Supported EVM networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EvmNetwork {
    /// Ethereum mainnet
    Mainnet,
    /// Goerli testnet (the network the sale was deployed to)
    Goerli,
    /// Sepolia testnet
    Sepolia,
    /// Local anvil/hardhat node
    Local,
}

impl EvmNetwork {
    pub fn chain_id(&self) -> ChainId {
        match self {
            EvmNetwork::Mainnet => ChainId::MAINNET,
            EvmNetwork::Goerli => ChainId::GOERLI,
            EvmNetwork::Sepolia => ChainId::SEPOLIA,
            EvmNetwork::Local => ChainId::LOCAL,
        }
    }

    pub fn default_rpc_url(&self) -> &str {
        match self {
            EvmNetwork::Mainnet => "https://eth.llamarpc.com",
            EvmNetwork::Goerli => "https://rpc.ankr.com/eth_goerli",
            EvmNetwork::Sepolia => "https://rpc.sepolia.org",
            EvmNetwork::Local => "http://127.0.0.1:8545",
        }
    }
}

/// EVM-specific configuration.
#[derive(Clone)]
pub struct EvmConfig {
    /// Network the wallet must be on
    pub network: EvmNetwork,

    /// Custom RPC endpoint URL (overrides network default)
    pub rpc_url: Option<String>,

    /// Hex-encoded signer key
    pub private_key: Option<String>,

    /// Crypto Devs NFT contract
    pub nft_contract: Option<Address>,

    /// Crypto Dev Token (ICO) contract
    pub ico_contract: Option<Address>,
}

impl EvmConfig {
    /// Create a new configuration with compile-time contract defaults.
    pub fn new(network: EvmNetwork) -> Self {
        Self {
            network,
            rpc_url: None,
            private_key: None,
            nft_contract: DEFAULT_NFT_CONTRACT.and_then(|s| s.parse().ok()),
            ico_contract: DEFAULT_ICO_CONTRACT.and_then(|s| s.parse().ok()),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ICO_NETWORK` - mainnet, goerli, sepolia or local (default: goerli)
    /// - `ICO_RPC_URL` - Custom RPC endpoint URL
    /// - `ICO_PRIVATE_KEY` - Hex-encoded signer key
    /// - `ICO_NFT_CONTRACT_ADDRESS` - Crypto Devs NFT contract
    /// - `ICO_TOKEN_CONTRACT_ADDRESS` - Crypto Dev Token contract
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_name = lookup("ICO_NETWORK").unwrap_or_else(|| "goerli".to_string());
        let network = EvmNetwork::from_str(&network_name).map_err(|_| {
            format!(
                "Invalid ICO_NETWORK: {}. Must be mainnet, goerli, sepolia, or local",
                network_name
            )
        })?;

        let mut config = Self::new(network);
        config.rpc_url = lookup("ICO_RPC_URL");
        config.private_key = lookup("ICO_PRIVATE_KEY");

        if let Some(raw) = lookup("ICO_NFT_CONTRACT_ADDRESS") {
            config.nft_contract = Some(parse_address("ICO_NFT_CONTRACT_ADDRESS", &raw)?);
        }
        if let Some(raw) = lookup("ICO_TOKEN_CONTRACT_ADDRESS") {
            config.ico_contract = Some(parse_address("ICO_TOKEN_CONTRACT_ADDRESS", &raw)?);
        }

        Ok(config)
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(url);
        self
    }

    /// Set signer key.
    pub fn with_private_key(mut self, key: String) -> Self {
        self.private_key = Some(key);
        self
    }

    /// Set both contract addresses.
    pub fn with_contracts(mut self, nft: Address, ico: Address) -> Self {
        self.nft_contract = Some(nft);
        self.ico_contract = Some(ico);
        self
    }

    /// Get the RPC URL (custom or default for network).
    pub fn get_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }
}

fn parse_address(key: &str, raw: &str) -> Result<Address, String> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| format!("Invalid {}: {} ({})", key, raw, e))
}

impl BlockchainConfig for EvmConfig {
    fn network_name(&self) -> &str {
        self.network.into()
    }

    fn rpc_url(&self) -> &str {
        self.get_rpc_url()
    }

    fn chain_id(&self) -> ChainId {
        self.network.chain_id()
    }

    fn validate(&self) -> Result<(), String> {
        let url = self.get_rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("Invalid RPC URL format: {}", url));
        }

        match self.private_key.as_deref() {
            None => return Err("ICO_PRIVATE_KEY is not set".to_string()),
            Some(key) if key.trim().is_empty() => {
                return Err("ICO_PRIVATE_KEY cannot be empty".to_string());
            }
            Some(_) => {}
        }

        let nft = self
            .nft_contract
            .ok_or_else(|| "NFT contract address is not configured".to_string())?;
        let ico = self
            .ico_contract
            .ok_or_else(|| "Token contract address is not configured".to_string())?;
        if nft == ico {
            return Err("NFT and token contracts must differ".to_string());
        }

        Ok(())
    }
}

impl fmt::Debug for EvmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmConfig")
            .field("network", &self.network)
            .field("rpc_url", &self.get_rpc_url())
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("nft_contract", &self.nft_contract)
            .field("ico_contract", &self.ico_contract)
            .finish()
    }
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self::new(EvmNetwork::Goerli)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const NFT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
    const ICO: &str = "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_goerli() {
        let config = EvmConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.network, EvmNetwork::Goerli);
        assert_eq!(config.chain_id(), ChainId::GOERLI);
        assert_eq!(config.network_name(), "goerli");
    }

    #[test]
    fn parses_network_case_insensitively() {
        let config = EvmConfig::from_lookup(lookup(&[("ICO_NETWORK", "Sepolia")])).unwrap();
        assert_eq!(config.network, EvmNetwork::Sepolia);
        assert_eq!(config.get_rpc_url(), "https://rpc.sepolia.org");
    }

    #[test]
    fn rejects_unknown_network() {
        let err = EvmConfig::from_lookup(lookup(&[("ICO_NETWORK", "ropsten")])).unwrap_err();
        assert!(err.contains("ropsten"));
    }

    #[test]
    fn rejects_malformed_contract_address() {
        let err = EvmConfig::from_lookup(lookup(&[("ICO_NFT_CONTRACT_ADDRESS", "0x1234")]))
            .unwrap_err();
        assert!(err.contains("ICO_NFT_CONTRACT_ADDRESS"));
    }

    #[test]
    fn validate_requires_key_and_contracts() {
        let config = EvmConfig::from_lookup(lookup(&[
            ("ICO_NETWORK", "local"),
            ("ICO_NFT_CONTRACT_ADDRESS", NFT),
            ("ICO_TOKEN_CONTRACT_ADDRESS", ICO),
        ]))
        .unwrap();
        assert!(config.validate().unwrap_err().contains("ICO_PRIVATE_KEY"));

        let config = config.with_private_key("0x01".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = EvmConfig::new(EvmNetwork::Local)
            .with_rpc_url("ws://127.0.0.1:8545".to_string())
            .with_private_key("0x01".to_string())
            .with_contracts(NFT.parse().unwrap(), ICO.parse().unwrap());
        assert!(config.validate().unwrap_err().contains("RPC URL"));
    }

    #[test]
    fn debug_output_redacts_private_key() {
        let config = EvmConfig::default().with_private_key("deadbeef".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("<redacted>"));
    }
}
