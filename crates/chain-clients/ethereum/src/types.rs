use alloy::network::{Ethereum, EthereumWallet};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, RootProvider};
use alloy::transports::http::{Client, Http};

/// Read-only provider, as built by `ProviderBuilder::new().on_http(..)`.
pub type DefaultHttpProvider = RootProvider<Http<Client>>;

/// Provider with the recommended fillers and a local wallet attached, used
/// by the write surface.
pub type LocalWalletSignerMiddleware = FillProvider<
    JoinFill<
        JoinFill<Identity, JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>>,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Http<Client>>,
    Http<Client>,
    Ethereum,
>;
