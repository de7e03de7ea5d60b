//! Frontend configuration structures and loaders.
//!
//! This module contains settings shared by every frontend implementation
//! (channel sizes, message log, sale parameters, confirmation policy).

use std::env;

use client_blockchain_core::U256;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub channels: ChannelConfig,
    pub messages: MessageConfig,
    pub sale: SaleConfig,
    pub sync: SyncConfig,
}

impl FrontendConfig {
    pub const fn new(
        channels: ChannelConfig,
        messages: MessageConfig,
        sale: SaleConfig,
        sync: SyncConfig,
    ) -> Self {
        Self {
            channels,
            messages,
            sale,
            sync,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLI_COMMAND_BUFFER` - Command queue size (default: 16)
    /// - `CLI_EVENT_BUFFER` - Event broadcast capacity (default: 64)
    /// - `CLI_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `ICO_TOKEN_PRICE_WEI` - Price of one token in wei (default: 10^15)
    /// - `ICO_MAX_TOTAL_SUPPLY` - Displayed supply cap in tokens (default: 10000)
    /// - `ICO_TOKENS_PER_NFT` - Tokens granted per claimed NFT (default: 10)
    /// - `ICO_CONFIRMATIONS` - Confirmations awaited per write (default: 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary key lookup.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Channel configuration
        if let Some(capacity) = read_env::<usize, _>(&lookup, "CLI_COMMAND_BUFFER") {
            config.channels.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize, _>(&lookup, "CLI_EVENT_BUFFER") {
            config.channels.event_buffer = capacity.max(1);
        }

        // Message configuration
        if let Some(capacity) = read_env::<usize, _>(&lookup, "CLI_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        // Sale parameters
        if let Some(price) = read_env::<U256, _>(&lookup, "ICO_TOKEN_PRICE_WEI") {
            config.sale.token_price_wei = price;
        }
        if let Some(cap) = read_env::<u64, _>(&lookup, "ICO_MAX_TOTAL_SUPPLY") {
            config.sale.max_total_supply = cap;
        }
        if let Some(per_nft) = read_env::<u64, _>(&lookup, "ICO_TOKENS_PER_NFT") {
            config.sale.tokens_per_nft = per_nft;
        }

        if let Some(confirmations) = read_env::<u64, _>(&lookup, "ICO_CONFIRMATIONS") {
            config.sync.confirmations = confirmations.max(1);
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            command_buffer: 16,
            event_buffer: 64,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Fixed parameters of the deployed sale contract.
///
/// The contract is the authority; these values only drive payment
/// computation and display.
#[derive(Clone, Debug)]
pub struct SaleConfig {
    /// Price of one whole token, in wei.
    pub token_price_wei: U256,
    /// Supply cap in whole tokens.
    pub max_total_supply: u64,
    /// Whole tokens granted for each unclaimed NFT.
    pub tokens_per_nft: u64,
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            token_price_wei: U256::from(1_000_000_000_000_000u64),
            max_total_supply: 10_000,
            tokens_per_nft: 10,
        }
    }
}

impl SaleConfig {
    /// Payment in wei for `amount` whole tokens, or `None` when it does not
    /// fit in 256 bits.
    pub fn price_for(&self, amount: U256) -> Option<U256> {
        self.token_price_wei.checked_mul(amount)
    }
}

#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Confirmations awaited after each write before re-syncing.
    pub confirmations: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { confirmations: 1 }
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

/// Parses common boolean spellings (`true`/`1`/`yes`/`on` and their negations).
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
