use clap::{ArgGroup, Parser, Subcommand};

pub use server::ServerCliArgs as ServerParams;

pub mod chain;
pub mod server;
pub mod storage;

use chain::ethereum::EthereumChainCliArgs;
use storage::lighthouse::LighthouseStorageCliArgs;
use storage::pinata::PinataStorageCliArgs;

#[derive(Parser, Debug)]
#[command(
    name = "slate",
    about = "Slate - drawing NFT mint orchestration service",
    long_about = "Slate validates drawn images, pins them and their metadata to \
    content-addressed storage, mints them on an EVM chain and rebuilds the \
    gallery of recent mints by replaying on-chain events."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the slate service
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[clap(
    group(
        ArgGroup::new("storage_provider")
            .args(&["store_on_lighthouse", "store_on_pinata"])
            .multiple(false)
    )
)]
pub struct RunCmd {
    #[command(flatten)]
    pub server_args: ServerParams,

    #[command(flatten)]
    pub ethereum_args: EthereumChainCliArgs,

    #[command(flatten)]
    pub lighthouse_args: LighthouseStorageCliArgs,

    #[command(flatten)]
    pub pinata_args: PinataStorageCliArgs,
}
