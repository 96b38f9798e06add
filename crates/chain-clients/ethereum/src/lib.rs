use std::time::Duration;

use alloy::consensus::TxReceipt;
use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolEvent;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slate_chain_client_interface::{ChainClient, ChainClientError, ConfirmedTransaction, MintEvent};
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

pub mod interfaces;
pub mod types;

use crate::interfaces::{DrawingNFT, IdRegistry};
use crate::types::{DefaultHttpProvider, LocalWalletSignerMiddleware};

pub const PRIVATE_KEY_SETTING: &str = "SLATE_ETHEREUM_PRIVATE_KEY";
pub const CONTRACT_ADDRESS_SETTING: &str = "SLATE_NFT_CONTRACT_ADDRESS";

// Transaction confirmation polling
const MAX_CONFIRMATION_ATTEMPTS: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EthereumChainValidatedArgs {
    /// RPC of the chain the NFT contract lives on.
    pub ethereum_rpc_url: Url,

    /// Signing key for server-custodied minting. Absent in client-signed
    /// deployments; the write surface then reports `MissingCredential`.
    pub ethereum_private_key: Option<String>,

    pub nft_contract_address: Option<Address>,

    /// RPC of the chain the identity registry lives on.
    pub id_registry_rpc_url: Url,

    pub id_registry_address: Address,

    /// Seconds between confirmation polls.
    pub confirmation_retry_wait_in_secs: u64,
}

pub struct EthereumChainClient {
    provider: DefaultHttpProvider,
    registry_provider: DefaultHttpProvider,
    wallet_provider: Option<LocalWalletSignerMiddleware>,
    signer_address: Option<Address>,
    nft_contract_address: Option<Address>,
    id_registry_address: Address,
    confirmation_retry_wait_in_secs: u64,
}

impl EthereumChainClient {
    /// # Panics
    /// If a private key is configured but cannot be parsed.
    pub fn new_with_args(chain_cfg: &EthereumChainValidatedArgs) -> Self {
        let provider = ProviderBuilder::new().on_http(chain_cfg.ethereum_rpc_url.clone());
        let registry_provider = ProviderBuilder::new().on_http(chain_cfg.id_registry_rpc_url.clone());

        let (wallet_provider, signer_address) = match &chain_cfg.ethereum_private_key {
            Some(private_key) => {
                let signer: PrivateKeySigner = private_key.parse().expect("Failed to parse private key");
                let signer_address = signer.address();
                let wallet = EthereumWallet::from(signer);
                let wallet_provider = ProviderBuilder::new()
                    .with_recommended_fillers()
                    .wallet(wallet)
                    .on_http(chain_cfg.ethereum_rpc_url.clone());
                (Some(wallet_provider), Some(signer_address))
            }
            None => (None, None),
        };

        EthereumChainClient {
            provider,
            registry_provider,
            wallet_provider,
            signer_address,
            nft_contract_address: chain_cfg.nft_contract_address,
            id_registry_address: chain_cfg.id_registry_address,
            confirmation_retry_wait_in_secs: chain_cfg.confirmation_retry_wait_in_secs,
        }
    }

    fn nft_contract_address(&self) -> Result<Address, ChainClientError> {
        self.nft_contract_address.ok_or(ChainClientError::MissingContractAddress(CONTRACT_ADDRESS_SETTING))
    }
}

/// Maps a failed mint simulation to the typed taxonomy the orchestrator acts
/// on. The RPC only gives us the revert message, so this is string matching,
/// same as distinguishing underpriced-replacement errors on submission.
fn classify_simulation_error(message: &str) -> ChainClientError {
    let lowered = message.to_lowercase();
    if lowered.contains("insufficient funds") {
        ChainClientError::InsufficientFunds(message.to_string())
    } else if lowered.contains("not the owner") || lowered.contains("ownableunauthorizedaccount") {
        ChainClientError::NotContractOwner(message.to_string())
    } else {
        ChainClientError::SimulationReverted(message.to_string())
    }
}

#[async_trait]
impl ChainClient for EthereumChainClient {
    async fn custody_address_of(&self, fid: u64) -> Result<Address, ChainClientError> {
        let registry = IdRegistry::new(self.id_registry_address, self.registry_provider.clone());
        let custody = registry
            .custodyOf(U256::from(fid))
            .call()
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))?;
        debug!(fid, custody = %custody._0, "Resolved custody address");
        Ok(custody._0)
    }

    async fn get_mint_events(&self, from_block: u64) -> Result<Vec<MintEvent>, ChainClientError> {
        let contract_address = self.nft_contract_address()?;
        let filter = Filter::new()
            .address(contract_address)
            .event_signature(DrawingNFT::DrawingMinted::SIGNATURE_HASH)
            .from_block(from_block);

        let logs = self.provider.get_logs(&filter).await.map_err(|e| ChainClientError::Rpc(e.to_string()))?;

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            let decoded = match log.log_decode::<DrawingNFT::DrawingMinted>() {
                Ok(decoded) => decoded,
                Err(e) => {
                    // A foreign log slipping through the topic filter is not
                    // worth failing the whole replay over.
                    warn!(error = %e, "Skipping undecodable mint event log");
                    continue;
                }
            };
            let data = decoded.inner.data;
            events.push(MintEvent {
                to: data.to,
                token_id: data.tokenId,
                token_uri: data.tokenURI,
                block_number: log.block_number.unwrap_or_default(),
            });
        }
        debug!(count = events.len(), from_block, "Replayed mint events");
        Ok(events)
    }

    fn signer_address(&self) -> Result<Address, ChainClientError> {
        self.signer_address.ok_or(ChainClientError::MissingCredential(PRIVATE_KEY_SETTING))
    }

    async fn simulate_then_send(&self, recipient: Address, token_uri: String) -> Result<B256, ChainClientError> {
        let wallet_provider =
            self.wallet_provider.clone().ok_or(ChainClientError::MissingCredential(PRIVATE_KEY_SETTING))?;
        let contract_address = self.nft_contract_address()?;

        let contract = DrawingNFT::new(contract_address, wallet_provider);
        let call = contract.mint(recipient, token_uri);

        // Dry run first so reverts surface as typed failures before any gas
        // is spent.
        call.call().await.map_err(|e| classify_simulation_error(&e.to_string()))?;

        let pending = call.send().await.map_err(|e| ChainClientError::SubmissionFailed(e.to_string()))?;
        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, recipient = %recipient, "Mint transaction submitted");
        Ok(tx_hash)
    }

    async fn await_confirmation(
        &self,
        tx_hash: B256,
        confirmations: u64,
    ) -> Result<ConfirmedTransaction, ChainClientError> {
        for _ in 0..MAX_CONFIRMATION_ATTEMPTS {
            let maybe_receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ChainClientError::Rpc(e.to_string()))?;

            if let Some(receipt) = maybe_receipt {
                if let Some(block_number) = receipt.block_number {
                    let latest_block =
                        self.provider.get_block_number().await.map_err(|e| ChainClientError::Rpc(e.to_string()))?;
                    if latest_block.saturating_sub(block_number) + 1 >= confirmations {
                        info!(tx_hash = %tx_hash, block_number, "Mint transaction confirmed");
                        return Ok(ConfirmedTransaction { block_number, logs: receipt.inner.logs().to_vec() });
                    }
                }
            }
            sleep(Duration::from_secs(self.confirmation_retry_wait_in_secs)).await;
        }
        Err(ChainClientError::ConfirmationTimeout(tx_hash))
    }

    fn extract_token_id(&self, logs: &[Log]) -> Option<U256> {
        logs.iter()
            .find_map(|log| log.log_decode::<DrawingNFT::DrawingMinted>().ok())
            .map(|decoded| decoded.inner.data.tokenId)
    }
}
