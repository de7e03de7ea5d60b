//! View state owned by the controller and display snapshots derived from it.
use std::fmt;

use client_blockchain_core::U256;

use crate::config::SaleConfig;
use crate::format::format_ether;
use crate::message::{MessageEntry, MessageLevel, MessageLog};

/// User-initiated operation currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncAction {
    Connect,
    Refresh,
    Mint,
    Claim,
    Withdraw,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncAction::Connect => "connect",
            SyncAction::Refresh => "refresh",
            SyncAction::Mint => "mint",
            SyncAction::Claim => "claim",
            SyncAction::Withdraw => "withdraw",
        };
        write!(f, "{}", label)
    }
}

/// Local mirror of on-chain facts plus the user's pending input.
///
/// Balances are in token base units (18 decimals). Every read resets its
/// field to the zero value when it fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub wallet_connected: bool,
    /// Caller's NFTs whose claim has not been spent yet.
    pub tokens_to_be_claimed: u64,
    pub caller_balance: U256,
    pub total_minted: U256,
    pub is_owner: bool,
    /// Whole tokens to buy with the next mint; kept after submission.
    pub pending_mint_amount: U256,
    pub pending: Option<SyncAction>,
}

impl ViewState {
    /// Mint is only offered for a strictly positive quantity.
    pub fn can_mint(&self) -> bool {
        !self.pending_mint_amount.is_zero()
    }
}

/// Strings and flags a frontend renders, computed from [`ViewState`].
#[derive(Clone, Debug)]
pub struct ViewModel {
    pub connected: bool,
    pub minted_line: String,
    pub supply_line: String,
    pub claim_line: Option<String>,
    pub quantity: String,
    pub mint_enabled: bool,
    pub show_withdraw: bool,
    pub pending: Option<SyncAction>,
    pub messages: Vec<MessageEntry>,
}

impl ViewModel {
    pub fn from_state(
        state: &ViewState,
        sale: &SaleConfig,
        messages: &MessageLog,
        message_limit: usize,
    ) -> Self {
        let claim_line = (state.tokens_to_be_claimed > 0).then(|| {
            let tokens = state
                .tokens_to_be_claimed
                .saturating_mul(sale.tokens_per_nft);
            format!("{} Tokens can be claimed!", tokens)
        });

        Self {
            connected: state.wallet_connected,
            minted_line: format!(
                "You have minted {} Crypto Dev Tokens",
                format_ether(state.caller_balance)
            ),
            supply_line: format!(
                "Overall {}/{} have been minted!!!",
                format_ether(state.total_minted),
                sale.max_total_supply
            ),
            claim_line,
            quantity: state.pending_mint_amount.to_string(),
            mint_enabled: state.can_mint(),
            show_withdraw: state.is_owner,
            pending: state.pending,
            messages: messages.recent(message_limit).cloned().collect(),
        }
    }
}

/// Framework-agnostic styling hooks implemented by each frontend's theme.
pub trait PresentationMapper {
    type Style;

    fn style_message(&self, level: MessageLevel) -> Self::Style;

    /// Style for an action hint; disabled actions are rendered dimmed.
    fn style_action(&self, enabled: bool) -> Self::Style;

    /// Style for on-chain figures (balances, supply).
    fn style_figure(&self) -> Self::Style;

    fn emphasize(&self, base_style: Self::Style) -> Self::Style;
}
