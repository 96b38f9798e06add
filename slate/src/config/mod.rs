use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use slate_chain_client_interface::ChainClient;
use slate_ethereum_chain_client::{EthereumChainClient, EthereumChainValidatedArgs};
use slate_lighthouse_storage_client::{LighthouseStorageClient, LighthouseStorageValidatedArgs};
use slate_pinata_storage_client::{PinataStorageClient, PinataStorageValidatedArgs};
use slate_storage_client_interface::StorageClient;
use tracing::info;

use crate::cli::{RunCmd, ServerParams};
use crate::error::{SlateError, SlateResult};

/// Knobs of the mint pipeline and the gallery replay.
#[derive(Debug, Clone)]
pub struct MintParams {
    /// Confirmations required before a server-custodied mint is reported.
    pub confirmations: u64,
    /// Floor block of the gallery's event replay.
    pub deploy_block: u64,
}

/// Process-wide configuration: validated parameters plus the client handles
/// selected at startup. Everything the routes and the pipeline need hangs off
/// an `Arc<Config>`; nothing is read from ambient globals after construction,
/// which is what lets tests run against mock clients.
pub struct Config {
    server_params: ServerParams,
    mint_params: MintParams,
    storage: Arc<dyn StorageClient>,
    chain: Arc<dyn ChainClient>,
}

impl Config {
    pub fn new(
        server_params: ServerParams,
        mint_params: MintParams,
        storage: Arc<dyn StorageClient>,
        chain: Arc<dyn ChainClient>,
    ) -> Self {
        Self { server_params, mint_params, storage, chain }
    }

    pub async fn from_run_cmd(run_cmd: &RunCmd) -> SlateResult<Self> {
        let storage = build_storage_client(run_cmd)?;
        let chain = build_chain_client(run_cmd)?;

        let mint_params = MintParams {
            confirmations: run_cmd.ethereum_args.mint_confirmations,
            deploy_block: run_cmd.ethereum_args.nft_deploy_block,
        };

        Ok(Self::new(run_cmd.server_args.clone(), mint_params, storage, chain))
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn mint_params(&self) -> &MintParams {
        &self.mint_params
    }

    pub fn storage(&self) -> Arc<dyn StorageClient> {
        self.storage.clone()
    }

    pub fn chain(&self) -> Arc<dyn ChainClient> {
        self.chain.clone()
    }
}

fn build_storage_client(run_cmd: &RunCmd) -> SlateResult<Arc<dyn StorageClient>> {
    // Lighthouse is the default; Pinata is the explicit alternative. The
    // choice is made exactly once, here.
    if run_cmd.pinata_args.store_on_pinata {
        info!("Using Pinata as the storage provider");
        let params = PinataStorageValidatedArgs { pinata_jwt: run_cmd.pinata_args.pinata_jwt.clone() };
        Ok(Arc::new(PinataStorageClient::new_with_args(&params)))
    } else {
        info!("Using Lighthouse as the storage provider");
        let params =
            LighthouseStorageValidatedArgs { lighthouse_api_key: run_cmd.lighthouse_args.lighthouse_api_key.clone() };
        Ok(Arc::new(LighthouseStorageClient::new_with_args(&params)))
    }
}

fn build_chain_client(run_cmd: &RunCmd) -> SlateResult<Arc<dyn ChainClient>> {
    let args = &run_cmd.ethereum_args;

    let ethereum_rpc_url = args
        .ethereum_rpc_url
        .clone()
        .ok_or_else(|| SlateError::ConfigError("SLATE_ETHEREUM_RPC_URL is not set".to_string()))?;
    // The registry read defaults to the same RPC when no dedicated one is
    // configured; the Farcaster registry lives on Optimism in production.
    let id_registry_rpc_url = args.id_registry_rpc_url.clone().unwrap_or_else(|| ethereum_rpc_url.clone());

    let nft_contract_address = args
        .nft_contract_address
        .as_deref()
        .map(Address::from_str)
        .transpose()
        .map_err(|e| SlateError::ConfigError(format!("Invalid NFT contract address: {e}")))?;
    let id_registry_address = Address::from_str(&args.id_registry_address)
        .map_err(|e| SlateError::ConfigError(format!("Invalid identity registry address: {e}")))?;

    let validated = EthereumChainValidatedArgs {
        ethereum_rpc_url,
        ethereum_private_key: args.ethereum_private_key.clone(),
        nft_contract_address,
        id_registry_rpc_url,
        id_registry_address,
        confirmation_retry_wait_in_secs: args.confirmation_retry_wait_in_secs,
    };

    Ok(Arc::new(EthereumChainClient::new_with_args(&validated)))
}
