use clap::Args;

#[derive(Debug, Clone, Args)]
#[group()]
pub struct PinataStorageCliArgs {
    /// Use Pinata as the content-addressed storage provider.
    #[arg(long)]
    pub store_on_pinata: bool,

    /// The Pinata JWT.
    #[arg(env = "SLATE_PINATA_JWT", long)]
    pub pinata_jwt: Option<String>,
}
