use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
#[group(requires_all = ["ethereum_rpc_url"])]
pub struct EthereumChainCliArgs {
    /// The URL of the RPC node of the chain the NFT contract lives on.
    #[arg(env = "SLATE_ETHEREUM_RPC_URL", long)]
    pub ethereum_rpc_url: Option<Url>,

    /// The private key of the minting account. Only needed for
    /// server-custodied minting; leave unset when users sign client-side.
    #[arg(env = "SLATE_ETHEREUM_PRIVATE_KEY", long)]
    pub ethereum_private_key: Option<String>,

    /// The address of the drawing NFT contract.
    #[arg(env = "SLATE_NFT_CONTRACT_ADDRESS", long)]
    pub nft_contract_address: Option<String>,

    /// The block the NFT contract was deployed at. Bounds the gallery's
    /// event replay; 0 replays from genesis.
    #[arg(env = "SLATE_NFT_DEPLOY_BLOCK", long, default_value = "0")]
    pub nft_deploy_block: u64,

    /// Confirmations required before a mint is reported as settled.
    #[arg(env = "SLATE_MINT_CONFIRMATIONS", long, default_value = "1")]
    pub mint_confirmations: u64,

    /// The amount of time in seconds to wait between confirmation polls.
    #[arg(env = "SLATE_CONFIRMATION_RETRY_WAIT_IN_SECS", long, default_value = "2")]
    pub confirmation_retry_wait_in_secs: u64,

    /// The URL of the RPC node of the chain the identity registry lives on.
    #[arg(env = "SLATE_ID_REGISTRY_RPC_URL", long)]
    pub id_registry_rpc_url: Option<Url>,

    /// The address of the identity registry contract.
    #[arg(
        env = "SLATE_ID_REGISTRY_ADDRESS",
        long,
        default_value = "0x00000000Fc6c5F01Fc30151999387Bb99A9f489b"
    )]
    pub id_registry_address: String,
}
