//! EVM blockchain client implementation.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use client_blockchain_core::{
    BlockchainConfig, BlockchainTransport, ChainId, ContractError, IcoBlockchain, NftHoldings,
    TokenId, TokenSale, TransactionId, TransactionReceipt, TransactionStatus, TransportError,
    WalletConnector, WalletError, WalletSession,
};

use crate::config::EvmConfig;
use crate::contracts::{
    ICryptoDevToken::ICryptoDevTokenInstance, ICryptoDevs::ICryptoDevsInstance,
};
use crate::error::{
    EvmError, Result, confirmation_error, contract_error, wallet_error,
};

/// EVM blockchain client.
///
/// Signs with a local key and talks to both contracts over one HTTP provider.
/// The provider fills nonce, gas and chain id for every write.
pub struct EvmBlockchainClient {
    config: EvmConfig,
    signer_address: Address,
    provider: DynProvider,
    nft: ICryptoDevsInstance<DynProvider>,
    ico: ICryptoDevTokenInstance<DynProvider>,
}

impl EvmBlockchainClient {
    /// Create a new EVM blockchain client.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid, the signer key cannot be
    /// parsed, or the RPC URL is malformed. No network call is made here.
    pub fn new(config: EvmConfig) -> Result<Self> {
        config.validate().map_err(EvmError::InvalidConfig)?;

        let key = config.private_key.as_deref().unwrap_or_default().trim();
        let signer: PrivateKeySigner = key
            .parse()
            .map_err(|e| EvmError::InvalidKey(format!("{}", e)))?;
        let signer_address = signer.address();

        let url = config
            .get_rpc_url()
            .parse()
            .map_err(|e| EvmError::InvalidUrl(format!("{}", e)))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        // validate() guarantees both addresses are present.
        let nft_address = config.nft_contract.unwrap_or_default();
        let ico_address = config.ico_contract.unwrap_or_default();

        tracing::info!(
            network = %config.network,
            rpc = config.get_rpc_url(),
            signer = %signer_address,
            nft = %nft_address,
            ico = %ico_address,
            "EVM client configured"
        );

        Ok(Self {
            nft: ICryptoDevsInstance::new(nft_address, provider.clone()),
            ico: ICryptoDevTokenInstance::new(ico_address, provider.clone()),
            config,
            signer_address,
            provider,
        })
    }
}

fn to_transaction_id(hash: B256) -> TransactionId {
    TransactionId::from_bytes(hash.to_vec())
}

fn to_hash(tx_id: &TransactionId) -> std::result::Result<B256, TransportError> {
    B256::try_from(tx_id.as_bytes())
        .map_err(|_| TransportError::BackendError(format!("not a transaction hash: {}", tx_id)))
}

#[async_trait]
impl BlockchainTransport for EvmBlockchainClient {
    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        confirmations: u64,
    ) -> std::result::Result<TransactionReceipt, TransportError> {
        let hash = to_hash(tx_id)?;
        tracing::debug!(tx = %tx_id, confirmations, "waiting for confirmation");

        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), hash)
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .map_err(|e| confirmation_error(tx_id, e))?;

        let status = if receipt.status() {
            TransactionStatus::Confirmed {
                block_height: receipt.block_number.unwrap_or_default(),
            }
        } else {
            TransactionStatus::Failed {
                error: "execution reverted".to_string(),
            }
        };

        Ok(TransactionReceipt {
            transaction_id: to_transaction_id(receipt.transaction_hash),
            status,
            gas_used: receipt.gas_used,
        })
    }
}

#[async_trait]
impl WalletConnector for EvmBlockchainClient {
    fn supported_chain(&self) -> ChainId {
        self.config.chain_id()
    }

    async fn connect(&self) -> std::result::Result<WalletSession, WalletError> {
        let chain_id = self.provider.get_chain_id().await.map_err(wallet_error)?;
        Ok(WalletSession {
            address: self.signer_address,
            chain_id: ChainId(chain_id),
        })
    }
}

#[async_trait]
impl NftHoldings for EvmBlockchainClient {
    async fn nft_balance_of(&self, owner: Address) -> std::result::Result<U256, ContractError> {
        self.nft
            .balanceOf(owner)
            .call()
            .await
            .map_err(contract_error)
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> std::result::Result<TokenId, ContractError> {
        self.nft
            .tokenOfOwnerByIndex(owner, index)
            .call()
            .await
            .map_err(contract_error)
    }
}

#[async_trait]
impl TokenSale for EvmBlockchainClient {
    async fn token_ids_claimed(&self, token_id: TokenId) -> std::result::Result<bool, ContractError> {
        self.ico
            .tokenIdsClaimed(token_id)
            .call()
            .await
            .map_err(contract_error)
    }

    async fn balance_of(&self, owner: Address) -> std::result::Result<U256, ContractError> {
        self.ico
            .balanceOf(owner)
            .call()
            .await
            .map_err(contract_error)
    }

    async fn total_supply(&self) -> std::result::Result<U256, ContractError> {
        self.ico.totalSupply().call().await.map_err(contract_error)
    }

    async fn owner(&self) -> std::result::Result<Address, ContractError> {
        self.ico.owner().call().await.map_err(contract_error)
    }

    async fn mint(
        &self,
        amount: U256,
        value: U256,
    ) -> std::result::Result<TransactionId, ContractError> {
        let pending = self
            .ico
            .mint(amount)
            .value(value)
            .send()
            .await
            .map_err(contract_error)?;
        tracing::info!(tx = %pending.tx_hash(), %amount, %value, "mint submitted");
        Ok(to_transaction_id(*pending.tx_hash()))
    }

    async fn claim(&self) -> std::result::Result<TransactionId, ContractError> {
        let pending = self.ico.claim().send().await.map_err(contract_error)?;
        tracing::info!(tx = %pending.tx_hash(), "claim submitted");
        Ok(to_transaction_id(*pending.tx_hash()))
    }

    async fn withdraw(&self) -> std::result::Result<TransactionId, ContractError> {
        let pending = self.ico.withdraw().send().await.map_err(contract_error)?;
        tracing::info!(tx = %pending.tx_hash(), "withdraw submitted");
        Ok(to_transaction_id(*pending.tx_hash()))
    }
}

impl IcoBlockchain for EvmBlockchainClient {
    fn name(&self) -> &str {
        "EVM"
    }

    fn network(&self) -> &str {
        self.config.network_name()
    }
}
