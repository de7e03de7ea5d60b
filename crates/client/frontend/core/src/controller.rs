//! View-sync controller: pulls on-chain facts into [`ViewState`] and
//! dispatches the user's write transactions.
//!
//! Every public operation catches errors at its own boundary. A failed read
//! resets only the value it owns, a failed write leaves the state as it was,
//! and the diagnostic goes to the log. Nothing is propagated to the caller
//! beyond a success flag.

use std::sync::Arc;

use client_blockchain_core::{
    Address, BlockchainTransport, ChainId, ContractError, IcoBlockchain, NftHoldings, TokenSale,
    TransactionId, TransactionReceipt, TransactionStatus, TransportError, U256, WalletConnector,
    WalletError, WalletSession,
};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::config::{SaleConfig, SyncConfig};
use crate::event::SyncEvent;
use crate::view_model::{SyncAction, ViewState};
use crate::worker::SyncCommand;

/// Failure of a single controller step. Logged, never surfaced.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: ChainId, actual: ChainId },

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("transaction {tx} did not succeed: {reason}")]
    Reverted { tx: TransactionId, reason: String },

    #[error("payment for {amount} tokens overflows 256 bits")]
    PriceOverflow { amount: U256 },
}

pub type Result<T> = std::result::Result<T, SyncError>;

pub struct ViewSync {
    chain: Arc<dyn IcoBlockchain>,
    sale: SaleConfig,
    sync: SyncConfig,
    state: watch::Sender<ViewState>,
    events: broadcast::Sender<SyncEvent>,
}

impl ViewSync {
    pub fn new(
        chain: Arc<dyn IcoBlockchain>,
        sale: SaleConfig,
        sync: SyncConfig,
        event_buffer: usize,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self {
            chain,
            sale,
            sync,
            state,
            events,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<SyncEvent> {
        self.events.clone()
    }

    pub fn can_mint(&self) -> bool {
        self.state.borrow().can_mint()
    }

    pub fn set_pending_mint_amount(&self, amount: U256) {
        self.update(|state| state.pending_mint_amount = amount);
    }

    /// Runs one command to completion, bracketing it with action events.
    pub async fn execute(&self, command: SyncCommand) {
        let action = match &command {
            SyncCommand::Mint(amount) => {
                self.set_pending_mint_amount(*amount);
                if !self.can_mint() {
                    warn!("mint requested with a zero quantity; ignoring");
                    return;
                }
                SyncAction::Mint
            }
            SyncCommand::Initialize | SyncCommand::Connect => SyncAction::Connect,
            SyncCommand::RefreshAll => SyncAction::Refresh,
            SyncCommand::Claim => SyncAction::Claim,
            SyncCommand::Withdraw => SyncAction::Withdraw,
        };

        self.update(|state| state.pending = Some(action));
        self.emit(SyncEvent::ActionStarted(action));

        let succeeded = match command {
            SyncCommand::Initialize => self.initialize().await,
            SyncCommand::Connect => self.connect().await,
            SyncCommand::RefreshAll => self.refresh_all().await,
            SyncCommand::Mint(_) => self.mint().await,
            SyncCommand::Claim => self.claim().await,
            SyncCommand::Withdraw => self.withdraw().await,
        };

        self.update(|state| state.pending = None);
        self.emit(SyncEvent::ActionFinished { action, succeeded });
    }

    /// Acquire a wallet session on the supported network.
    pub async fn connect(&self) -> bool {
        match self.acquire_session().await {
            Ok(session) => {
                info!(address = %session.address, chain = %session.chain_id, "wallet connected");
                self.update(|state| state.wallet_connected = true);
                true
            }
            Err(e) => {
                error!(error = %e, "wallet connection failed");
                self.update(|state| state.wallet_connected = false);
                false
            }
        }
    }

    /// Start-up flow: connect, then load every view value.
    pub async fn initialize(&self) -> bool {
        let connected = self.connect().await;
        let loaded = self.refresh_all().await;
        connected && loaded
    }

    /// Re-reads all four values in a fixed order. A failure only resets the
    /// value it owns. Returns whether every read succeeded.
    pub async fn refresh_all(&self) -> bool {
        let minted = self.refresh_total_minted().await;
        let balance = self.refresh_caller_balance().await;
        let claimable = self.refresh_claimable().await;
        let owner = self.refresh_owner().await;
        minted && balance && claimable && owner
    }

    pub async fn refresh_total_minted(&self) -> bool {
        match self.read_total_minted().await {
            Ok(total) => {
                self.update(|state| state.total_minted = total);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to read total minted");
                self.update(|state| state.total_minted = U256::ZERO);
                false
            }
        }
    }

    pub async fn refresh_caller_balance(&self) -> bool {
        match self.read_caller_balance().await {
            Ok(balance) => {
                self.update(|state| state.caller_balance = balance);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to read caller balance");
                self.update(|state| state.caller_balance = U256::ZERO);
                false
            }
        }
    }

    pub async fn refresh_claimable(&self) -> bool {
        let result = match self.acquire_session().await {
            Ok(session) => self.compute_claimable(session.address).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(count) => {
                self.update(|state| state.tokens_to_be_claimed = count);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to compute claimable tokens");
                self.update(|state| state.tokens_to_be_claimed = 0);
                false
            }
        }
    }

    pub async fn refresh_owner(&self) -> bool {
        match self.read_is_owner().await {
            Ok(is_owner) => {
                self.update(|state| state.is_owner = is_owner);
                true
            }
            Err(e) => {
                error!(error = %e, "failed to read contract owner");
                self.update(|state| state.is_owner = false);
                false
            }
        }
    }

    /// Counts `owner`'s NFTs whose claim is unspent.
    ///
    /// Walks the enumeration one index at a time; a zero holding makes no
    /// per-token lookups.
    pub async fn compute_claimable(&self, owner: Address) -> Result<u64> {
        let holding = self.chain.nft_balance_of(owner).await?;
        if holding.is_zero() {
            return Ok(0);
        }

        let mut unclaimed = 0u64;
        let mut index = U256::ZERO;
        while index < holding {
            let token_id = self.chain.token_of_owner_by_index(owner, index).await?;
            if !self.chain.token_ids_claimed(token_id).await? {
                unclaimed += 1;
            }
            index += U256::from(1);
        }

        debug!(%owner, %holding, unclaimed, "claimable tokens computed");
        Ok(unclaimed)
    }

    /// Buys `pending_mint_amount` tokens at the configured unit price.
    ///
    /// A zero quantity is a no-op. The quantity is kept after submission.
    pub async fn mint(&self) -> bool {
        let amount = self.state.borrow().pending_mint_amount;
        if amount.is_zero() {
            warn!("mint skipped: quantity is zero");
            return false;
        }

        match self.try_mint(amount).await {
            Ok(receipt) => {
                info!(tx = %receipt.transaction_id, %amount, "mint confirmed");
                self.refresh_all().await;
                true
            }
            Err(e) => {
                error!(error = %e, %amount, "mint failed");
                false
            }
        }
    }

    pub async fn claim(&self) -> bool {
        match self.try_claim().await {
            Ok(receipt) => {
                info!(tx = %receipt.transaction_id, "claim confirmed");
                self.emit(SyncEvent::ClaimAcknowledged);
                self.refresh_all().await;
                true
            }
            Err(e) => {
                error!(error = %e, "claim failed");
                false
            }
        }
    }

    /// Owner-only in the UI; the contract enforces it.
    pub async fn withdraw(&self) -> bool {
        match self.try_withdraw().await {
            Ok(receipt) => {
                info!(tx = %receipt.transaction_id, "withdraw confirmed");
                self.refresh_all().await;
                true
            }
            Err(e) => {
                error!(error = %e, "withdraw failed");
                false
            }
        }
    }

    async fn acquire_session(&self) -> Result<WalletSession> {
        let session = self.chain.connect().await?;
        let expected = self.chain.supported_chain();
        if session.chain_id != expected {
            return Err(SyncError::WrongNetwork {
                expected,
                actual: session.chain_id,
            });
        }
        Ok(session)
    }

    async fn read_total_minted(&self) -> Result<U256> {
        self.acquire_session().await?;
        Ok(self.chain.total_supply().await?)
    }

    async fn read_caller_balance(&self) -> Result<U256> {
        let session = self.acquire_session().await?;
        Ok(self.chain.balance_of(session.address).await?)
    }

    async fn read_is_owner(&self) -> Result<bool> {
        let session = self.acquire_session().await?;
        let owner = self.chain.owner().await?;
        Ok(owner == session.address)
    }

    async fn try_mint(&self, amount: U256) -> Result<TransactionReceipt> {
        self.acquire_session().await?;
        let value = self
            .sale
            .price_for(amount)
            .ok_or(SyncError::PriceOverflow { amount })?;
        let tx = self.chain.mint(amount, value).await?;
        self.confirm(tx).await
    }

    async fn try_claim(&self) -> Result<TransactionReceipt> {
        self.acquire_session().await?;
        let tx = self.chain.claim().await?;
        self.confirm(tx).await
    }

    async fn try_withdraw(&self) -> Result<TransactionReceipt> {
        self.acquire_session().await?;
        let tx = self.chain.withdraw().await?;
        self.confirm(tx).await
    }

    async fn confirm(&self, tx: TransactionId) -> Result<TransactionReceipt> {
        debug!(%tx, confirmations = self.sync.confirmations, "awaiting confirmation");
        let receipt = self
            .chain
            .wait_for_confirmation(&tx, self.sync.confirmations)
            .await?;

        match &receipt.status {
            TransactionStatus::Confirmed { .. } => Ok(receipt),
            TransactionStatus::Failed { error } => Err(SyncError::Reverted {
                tx,
                reason: error.clone(),
            }),
        }
    }

    fn update(&self, modify: impl FnOnce(&mut ViewState)) {
        self.state.send_modify(modify);
        self.emit(SyncEvent::StateChanged);
    }

    fn emit(&self, event: SyncEvent) {
        // No subscribers is fine; the watch channel still holds the state.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use client_blockchain_core::{MockCall, MockIcoChain};

    use super::*;

    const CALLER_UPPER: &str = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";
    const CALLER_LOWER: &str = "0xabcdef0123456789abcdef0123456789abcdef01";

    fn tokens(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10).pow(U256::from(18))
    }

    fn controller(chain: &MockIcoChain) -> ViewSync {
        ViewSync::new(
            Arc::new(chain.clone()),
            SaleConfig::default(),
            SyncConfig::default(),
            16,
        )
    }

    #[tokio::test]
    async fn connect_on_wrong_network_stays_disconnected() {
        let chain = MockIcoChain::new().with_wallet_chain(ChainId::MAINNET);
        let sync = controller(&chain);

        assert!(!sync.connect().await);
        assert!(!sync.state().wallet_connected);

        chain.set_wallet_chain(ChainId::GOERLI);
        assert!(sync.connect().await);
        assert!(sync.state().wallet_connected);

        chain.set_wallet_chain(ChainId::SEPOLIA);
        assert!(!sync.connect().await);
        assert!(!sync.state().wallet_connected);
    }

    #[tokio::test]
    async fn connector_failure_stays_disconnected() {
        let chain = MockIcoChain::new();
        chain.fail(MockCall::Connect);
        let sync = controller(&chain);

        assert!(!sync.connect().await);
        assert!(!sync.state().wallet_connected);
    }

    #[tokio::test]
    async fn wrong_network_blocks_reads() {
        let chain = MockIcoChain::new()
            .with_wallet_chain(ChainId::MAINNET)
            .with_holdings(&[(1, false)]);
        let sync = controller(&chain);

        assert!(!sync.refresh_all().await);
        assert_eq!(chain.call_count(MockCall::TotalSupply), 0);
        assert_eq!(chain.call_count(MockCall::NftBalanceOf), 0);
        assert_eq!(sync.state().tokens_to_be_claimed, 0);
    }

    #[tokio::test]
    async fn refresh_isolates_each_read() {
        let chain = MockIcoChain::new().with_holdings(&[(1, false), (2, false)]);
        let caller = chain.caller();
        let chain = chain.with_token_balance(caller, tokens(7));
        let sync = controller(&chain);

        assert!(sync.refresh_all().await);
        assert_eq!(sync.state().caller_balance, tokens(7));
        assert_eq!(sync.state().tokens_to_be_claimed, 2);
        assert!(sync.state().is_owner);

        chain.fail(MockCall::BalanceOf);
        assert!(!sync.refresh_all().await);

        let state = sync.state();
        assert_eq!(state.caller_balance, U256::ZERO);
        assert_eq!(state.tokens_to_be_claimed, 2);
        assert!(state.is_owner);
        assert_eq!(chain.call_count(MockCall::TotalSupply), 2);
        assert_eq!(chain.call_count(MockCall::Owner), 2);
    }

    #[tokio::test]
    async fn failed_owner_read_clears_flag_only() {
        let chain = MockIcoChain::new().with_holdings(&[(4, false)]);
        let sync = controller(&chain);
        sync.refresh_all().await;
        assert!(sync.state().is_owner);

        chain.fail(MockCall::Owner);
        sync.refresh_all().await;
        assert!(!sync.state().is_owner);
        assert_eq!(sync.state().tokens_to_be_claimed, 1);
    }

    #[tokio::test]
    async fn zero_holding_makes_no_token_lookups() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);

        let count = sync.compute_claimable(chain.caller()).await.unwrap();
        assert_eq!(count, 0);
        assert_eq!(chain.call_count(MockCall::NftBalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::TokenOfOwnerByIndex), 0);
        assert_eq!(chain.call_count(MockCall::TokenIdsClaimed), 0);
    }

    #[tokio::test]
    async fn counts_only_unclaimed_tokens() {
        let chain = MockIcoChain::new().with_holdings(&[(11, false), (12, true), (13, false)]);
        let sync = controller(&chain);

        let count = sync.compute_claimable(chain.caller()).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(chain.call_count(MockCall::TokenOfOwnerByIndex), 3);
        assert_eq!(chain.call_count(MockCall::TokenIdsClaimed), 3);
    }

    #[tokio::test]
    async fn claim_status_failure_resets_claimable() {
        let chain = MockIcoChain::new().with_holdings(&[(1, false)]);
        let sync = controller(&chain);
        sync.refresh_claimable().await;
        assert_eq!(sync.state().tokens_to_be_claimed, 1);

        chain.fail(MockCall::TokenIdsClaimed);
        assert!(!sync.refresh_claimable().await);
        assert_eq!(sync.state().tokens_to_be_claimed, 0);
    }

    #[tokio::test]
    async fn zero_quantity_never_mints() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);

        assert!(!sync.can_mint());
        assert!(!sync.mint().await);
        sync.execute(SyncCommand::Mint(U256::ZERO)).await;
        assert_eq!(chain.call_count(MockCall::Mint), 0);
        assert!(sync.state().pending.is_none());
    }

    #[tokio::test]
    async fn mint_pays_unit_price_times_amount() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);

        sync.set_pending_mint_amount(U256::from(5));
        assert!(sync.mint().await);

        assert_eq!(
            chain.submitted_mints(),
            vec![(U256::from(5), U256::from(5_000_000_000_000_000u64))]
        );
        let state = sync.state();
        assert_eq!(state.caller_balance, tokens(5));
        assert_eq!(chain.token_balance(chain.caller()), tokens(5));
        assert_eq!(state.total_minted, tokens(5));
        assert_eq!(state.pending_mint_amount, U256::from(5));
    }

    #[tokio::test]
    async fn overflowing_payment_is_never_submitted() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);
        sync.set_pending_mint_amount(U256::MAX);

        assert!(!sync.mint().await);
        assert_eq!(chain.call_count(MockCall::Mint), 0);
        assert!(chain.submitted_mints().is_empty());
    }

    #[tokio::test]
    async fn execute_mint_records_requested_amount() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);

        sync.execute(SyncCommand::Mint(U256::from(3))).await;

        assert_eq!(sync.state().pending_mint_amount, U256::from(3));
        assert_eq!(
            chain.submitted_mints(),
            vec![(U256::from(3), U256::from(3_000_000_000_000_000u64))]
        );
    }

    #[tokio::test]
    async fn reverted_mint_skips_refresh() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);
        sync.set_pending_mint_amount(U256::from(10_001));

        assert!(!sync.mint().await);
        assert_eq!(chain.call_count(MockCall::TotalSupply), 0);
        assert!(chain.submitted_mints().is_empty());
    }

    #[tokio::test]
    async fn owner_match_ignores_hex_case() {
        let caller: Address = CALLER_UPPER.parse().unwrap();
        let owner: Address = CALLER_LOWER.parse().unwrap();
        let chain = MockIcoChain::new().with_caller(caller).with_owner(owner);
        let sync = controller(&chain);

        assert!(sync.refresh_owner().await);
        assert!(sync.state().is_owner);

        chain.set_owner(Address::repeat_byte(0x11));
        assert!(sync.refresh_owner().await);
        assert!(!sync.state().is_owner);
    }

    #[tokio::test]
    async fn successful_write_refetches_all_reads_despite_errors() {
        let chain = MockIcoChain::new().with_holdings(&[(1, false)]);
        let sync = controller(&chain);
        sync.set_pending_mint_amount(U256::from(2));
        chain.fail(MockCall::TotalSupply);

        assert!(sync.mint().await);

        assert_eq!(chain.call_count(MockCall::TotalSupply), 1);
        assert_eq!(chain.call_count(MockCall::BalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::NftBalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::Owner), 1);

        let state = sync.state();
        assert_eq!(state.total_minted, U256::ZERO);
        assert_eq!(state.caller_balance, tokens(2));
        assert_eq!(state.tokens_to_be_claimed, 1);
    }

    #[tokio::test]
    async fn successful_claim_refetches_all_reads_despite_errors() {
        let chain = MockIcoChain::new().with_holdings(&[(1, false), (2, true)]);
        let sync = controller(&chain);
        chain.fail(MockCall::BalanceOf);

        assert!(sync.claim().await);

        assert_eq!(chain.call_count(MockCall::TotalSupply), 1);
        assert_eq!(chain.call_count(MockCall::BalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::NftBalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::Owner), 1);

        let state = sync.state();
        assert_eq!(state.caller_balance, U256::ZERO);
        assert_eq!(state.total_minted, tokens(10));
        assert_eq!(state.tokens_to_be_claimed, 0);
        assert!(state.is_owner);
    }

    #[tokio::test]
    async fn successful_withdraw_refetches_all_reads_despite_errors() {
        let chain = MockIcoChain::new().with_holdings(&[(5, false)]);
        let sync = controller(&chain);
        sync.set_pending_mint_amount(U256::from(4));
        assert!(sync.mint().await);
        chain.reset_call_counts();
        chain.fail(MockCall::Owner);

        assert!(sync.withdraw().await);

        assert_eq!(chain.call_count(MockCall::TotalSupply), 1);
        assert_eq!(chain.call_count(MockCall::BalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::NftBalanceOf), 1);
        assert_eq!(chain.call_count(MockCall::Owner), 1);

        let state = sync.state();
        assert!(!state.is_owner);
        assert_eq!(state.total_minted, tokens(4));
        assert_eq!(state.caller_balance, tokens(4));
        assert_eq!(state.tokens_to_be_claimed, 1);
    }

    #[tokio::test]
    async fn claim_acknowledges_once_and_refreshes() {
        let chain = MockIcoChain::new().with_holdings(&[(1, false), (2, false)]);
        let sync = controller(&chain);
        let mut events = sync.subscribe();

        assert!(sync.claim().await);
        assert!(chain.is_claimed(1) && chain.is_claimed(2));

        let mut acknowledgements = 0;
        while let Ok(event) = events.try_recv() {
            if event == SyncEvent::ClaimAcknowledged {
                acknowledgements += 1;
            }
        }
        assert_eq!(acknowledgements, 1);
        assert_eq!(sync.state().tokens_to_be_claimed, 0);
        assert_eq!(sync.state().caller_balance, tokens(20));
    }

    #[tokio::test]
    async fn failed_claim_is_silent() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);
        let mut events = sync.subscribe();

        assert!(!sync.claim().await);
        while let Ok(event) = events.try_recv() {
            assert_ne!(event, SyncEvent::ClaimAcknowledged);
        }
    }

    #[tokio::test]
    async fn withdraw_rechecks_owner() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);
        sync.set_pending_mint_amount(U256::from(1));
        assert!(sync.mint().await);
        chain.reset_call_counts();

        assert!(sync.withdraw().await);
        assert_eq!(chain.contract_balance(), U256::ZERO);
        assert_eq!(chain.call_count(MockCall::Owner), 1);
        assert!(sync.state().is_owner);
    }

    #[tokio::test]
    async fn non_owner_withdraw_fails_without_refresh() {
        let chain = MockIcoChain::new().with_owner(Address::repeat_byte(0x22));
        let sync = controller(&chain);

        assert!(!sync.withdraw().await);
        assert_eq!(chain.call_count(MockCall::Owner), 0);
    }

    #[tokio::test]
    async fn execute_brackets_actions_with_events() {
        let chain = MockIcoChain::new();
        let sync = controller(&chain);
        let mut events = sync.subscribe();

        sync.execute(SyncCommand::Connect).await;

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            if event != SyncEvent::StateChanged {
                seen.push(event);
            }
        }
        assert_eq!(
            seen,
            vec![
                SyncEvent::ActionStarted(SyncAction::Connect),
                SyncEvent::ActionFinished {
                    action: SyncAction::Connect,
                    succeeded: true
                },
            ]
        );
        assert!(sync.state().pending.is_none());
    }

    #[tokio::test]
    async fn initialize_loads_after_failed_connect() {
        let chain = MockIcoChain::new();
        chain.fail(MockCall::Connect);
        let sync = controller(&chain);

        assert!(!sync.initialize().await);
        // Every read re-prompts the connector.
        assert_eq!(chain.call_count(MockCall::Connect), 5);
    }
}
