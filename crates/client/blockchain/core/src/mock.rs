//! Mock blockchain client for testing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{
    BlockchainTransport, ContractError, IcoBlockchain, NftHoldings, TokenSale, TransportError,
    WalletConnector, WalletError,
};
use crate::types::{
    Address, ChainId, TokenId, TransactionId, TransactionReceipt, TransactionStatus, U256,
    WalletSession,
};

/// Price of one whole token in wei (0.001 ether).
pub const TOKEN_PRICE_WEI: u64 = 1_000_000_000_000_000;

/// Whole tokens granted per unclaimed NFT.
pub const TOKENS_PER_NFT: u64 = 10;

/// Supply cap in whole tokens.
pub const MAX_TOTAL_SUPPLY: u64 = 10_000;

const DECIMALS: u64 = 18;

/// Remote call kinds, used for fault injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCall {
    Connect,
    Confirm,
    NftBalanceOf,
    TokenOfOwnerByIndex,
    TokenIdsClaimed,
    BalanceOf,
    TotalSupply,
    Owner,
    Mint,
    Claim,
    Withdraw,
}

struct MockState {
    caller: Address,
    owner: Address,
    wallet_chain: ChainId,
    supported_chain: ChainId,
    /// Caller's NFTs in enumeration order.
    holdings: Vec<TokenId>,
    claimed: HashSet<TokenId>,
    balances: HashMap<Address, U256>,
    total_supply: U256,
    contract_wei: U256,
    failing: HashSet<MockCall>,
    calls: HashMap<MockCall, usize>,
    mints: Vec<(U256, U256)>,
    receipts: HashMap<TransactionId, TransactionReceipt>,
    tx_counter: u64,
    block_height: u64,
}

/// Mock sale chain for testing without network.
///
/// Simulates both contracts in-memory with the same rules as the deployed
/// Solidity code: fixed price, supply cap, one claim per NFT, owner-only withdraw.
#[derive(Clone)]
pub struct MockIcoChain {
    state: Arc<Mutex<MockState>>,
    confirmation_delay: Option<Duration>,
}

impl MockIcoChain {
    pub fn new() -> Self {
        let caller = Address::repeat_byte(0xca);
        Self {
            state: Arc::new(Mutex::new(MockState {
                caller,
                owner: caller,
                wallet_chain: ChainId::GOERLI,
                supported_chain: ChainId::GOERLI,
                holdings: Vec::new(),
                claimed: HashSet::new(),
                balances: HashMap::new(),
                total_supply: U256::ZERO,
                contract_wei: U256::ZERO,
                failing: HashSet::new(),
                calls: HashMap::new(),
                mints: Vec::new(),
                receipts: HashMap::new(),
                tx_counter: 0,
                block_height: 0,
            })),
            confirmation_delay: None,
        }
    }

    /// Address the wallet signs with.
    pub fn with_caller(self, caller: Address) -> Self {
        self.lock().caller = caller;
        self
    }

    /// Owner recorded by the sale contract.
    pub fn with_owner(self, owner: Address) -> Self {
        self.lock().owner = owner;
        self
    }

    /// Chain the wallet reports on connect.
    pub fn with_wallet_chain(self, chain: ChainId) -> Self {
        self.lock().wallet_chain = chain;
        self
    }

    /// Caller's NFTs as `(token_id, already_claimed)` in enumeration order.
    pub fn with_holdings(self, holdings: &[(u64, bool)]) -> Self {
        {
            let mut state = self.lock();
            state.holdings = holdings.iter().map(|(id, _)| U256::from(*id)).collect();
            state.claimed = holdings
                .iter()
                .filter(|(_, claimed)| *claimed)
                .map(|(id, _)| U256::from(*id))
                .collect();
        }
        self
    }

    /// Pre-existing token balance; also counted in the total supply.
    pub fn with_token_balance(self, holder: Address, base_units: U256) -> Self {
        {
            let mut state = self.lock();
            *state.balances.entry(holder).or_default() += base_units;
            state.total_supply += base_units;
        }
        self
    }

    /// Delay applied to every confirmation wait.
    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = Some(delay);
        self
    }

    pub fn caller(&self) -> Address {
        self.lock().caller
    }

    /// Make every subsequent `call` fail with a network error.
    pub fn fail(&self, call: MockCall) {
        self.lock().failing.insert(call);
    }

    /// Undo [`Self::fail`].
    pub fn recover(&self, call: MockCall) {
        self.lock().failing.remove(&call);
    }

    pub fn set_wallet_chain(&self, chain: ChainId) {
        self.lock().wallet_chain = chain;
    }

    pub fn set_owner(&self, owner: Address) {
        self.lock().owner = owner;
    }

    /// Number of times `call` was attempted (including injected failures).
    pub fn call_count(&self, call: MockCall) -> usize {
        self.lock().calls.get(&call).copied().unwrap_or(0)
    }

    pub fn reset_call_counts(&self) {
        self.lock().calls.clear();
    }

    /// Accepted mints as `(amount, value_wei)`.
    pub fn submitted_mints(&self) -> Vec<(U256, U256)> {
        self.lock().mints.clone()
    }

    pub fn token_balance(&self, holder: Address) -> U256 {
        self.lock().balances.get(&holder).copied().unwrap_or_default()
    }

    /// Wei held by the sale contract.
    pub fn contract_balance(&self) -> U256 {
        self.lock().contract_wei
    }

    pub fn is_claimed(&self, token_id: u64) -> bool {
        self.lock().claimed.contains(&U256::from(token_id))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call, then honor any injected failure.
    fn enter(&self, call: MockCall) -> Result<MutexGuard<'_, MockState>, TransportError> {
        let mut state = self.lock();
        *state.calls.entry(call).or_default() += 1;
        if state.failing.contains(&call) {
            return Err(TransportError::NetworkError(format!(
                "injected failure: {:?}",
                call
            )));
        }
        Ok(state)
    }
}

impl Default for MockIcoChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    fn record_transaction(&mut self) -> TransactionId {
        self.tx_counter += 1;
        self.block_height += 1;
        let tx_id = TransactionId::from_bytes(self.tx_counter.to_be_bytes().to_vec());
        self.receipts.insert(
            tx_id.clone(),
            TransactionReceipt {
                transaction_id: tx_id.clone(),
                status: TransactionStatus::Confirmed {
                    block_height: self.block_height,
                },
                gas_used: 21_000,
            },
        );
        tx_id
    }
}

fn whole_tokens(amount: U256) -> U256 {
    amount * U256::from(10).pow(U256::from(DECIMALS))
}

#[async_trait]
impl BlockchainTransport for MockIcoChain {
    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        _confirmations: u64,
    ) -> Result<TransactionReceipt, TransportError> {
        drop(self.enter(MockCall::Confirm)?);

        if let Some(delay) = self.confirmation_delay {
            tokio::time::sleep(delay).await;
        }

        self.lock()
            .receipts
            .get(tx_id)
            .cloned()
            .ok_or_else(|| TransportError::ConfirmationFailed {
                tx: tx_id.clone(),
                reason: "unknown transaction".to_string(),
            })
    }
}

#[async_trait]
impl WalletConnector for MockIcoChain {
    fn supported_chain(&self) -> ChainId {
        self.lock().supported_chain
    }

    async fn connect(&self) -> Result<WalletSession, WalletError> {
        let state = self.enter(MockCall::Connect)?;
        Ok(WalletSession {
            address: state.caller,
            chain_id: state.wallet_chain,
        })
    }
}

#[async_trait]
impl NftHoldings for MockIcoChain {
    async fn nft_balance_of(&self, owner: Address) -> Result<U256, ContractError> {
        let state = self.enter(MockCall::NftBalanceOf)?;
        if owner == state.caller {
            Ok(U256::from(state.holdings.len()))
        } else {
            Ok(U256::ZERO)
        }
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<TokenId, ContractError> {
        let state = self.enter(MockCall::TokenOfOwnerByIndex)?;
        if owner != state.caller {
            return Err(ContractError::Reverted(
                "ERC721Enumerable: owner index out of bounds".to_string(),
            ));
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| state.holdings.get(i).copied())
            .ok_or_else(|| {
                ContractError::Reverted("ERC721Enumerable: owner index out of bounds".to_string())
            })
    }
}

#[async_trait]
impl TokenSale for MockIcoChain {
    async fn token_ids_claimed(&self, token_id: TokenId) -> Result<bool, ContractError> {
        let state = self.enter(MockCall::TokenIdsClaimed)?;
        Ok(state.claimed.contains(&token_id))
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, ContractError> {
        let state = self.enter(MockCall::BalanceOf)?;
        Ok(state.balances.get(&owner).copied().unwrap_or_default())
    }

    async fn total_supply(&self) -> Result<U256, ContractError> {
        Ok(self.enter(MockCall::TotalSupply)?.total_supply)
    }

    async fn owner(&self) -> Result<Address, ContractError> {
        Ok(self.enter(MockCall::Owner)?.owner)
    }

    async fn mint(&self, amount: U256, value: U256) -> Result<TransactionId, ContractError> {
        let mut state = self.enter(MockCall::Mint)?;

        let required = U256::from(TOKEN_PRICE_WEI) * amount;
        if value < required {
            return Err(ContractError::Reverted("Ether sent is incorrect".to_string()));
        }

        let minted = whole_tokens(amount);
        if state.total_supply + minted > whole_tokens(U256::from(MAX_TOTAL_SUPPLY)) {
            return Err(ContractError::Reverted(
                "Exceeds the max total supply available.".to_string(),
            ));
        }

        let caller = state.caller;
        *state.balances.entry(caller).or_default() += minted;
        state.total_supply += minted;
        state.contract_wei += value;
        state.mints.push((amount, value));

        tracing::debug!(%amount, %value, "mock mint accepted");
        Ok(state.record_transaction())
    }

    async fn claim(&self) -> Result<TransactionId, ContractError> {
        let mut state = self.enter(MockCall::Claim)?;

        if state.holdings.is_empty() {
            return Err(ContractError::Reverted(
                "You dont own any Crypto Dev NFT's".to_string(),
            ));
        }

        let unclaimed: Vec<TokenId> = state
            .holdings
            .iter()
            .filter(|id| !state.claimed.contains(*id))
            .copied()
            .collect();
        if unclaimed.is_empty() {
            return Err(ContractError::Reverted(
                "You have already claimed all the tokens".to_string(),
            ));
        }

        let minted = whole_tokens(U256::from(unclaimed.len() as u64 * TOKENS_PER_NFT));
        state.claimed.extend(unclaimed);
        let caller = state.caller;
        *state.balances.entry(caller).or_default() += minted;
        state.total_supply += minted;

        Ok(state.record_transaction())
    }

    async fn withdraw(&self) -> Result<TransactionId, ContractError> {
        let mut state = self.enter(MockCall::Withdraw)?;

        if state.caller != state.owner {
            return Err(ContractError::Reverted(
                "Ownable: caller is not the owner".to_string(),
            ));
        }
        if state.contract_wei.is_zero() {
            return Err(ContractError::Reverted(
                "Nothing to withdraw, contract balance empty".to_string(),
            ));
        }

        state.contract_wei = U256::ZERO;
        Ok(state.record_transaction())
    }
}

impl IcoBlockchain for MockIcoChain {
    fn name(&self) -> &str {
        "Mock"
    }

    fn network(&self) -> &str {
        "mock-network"
    }
}
