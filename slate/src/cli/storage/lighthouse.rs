use clap::Args;

#[derive(Debug, Clone, Args)]
#[group()]
pub struct LighthouseStorageCliArgs {
    /// Use Lighthouse as the content-addressed storage provider.
    #[arg(long)]
    pub store_on_lighthouse: bool,

    /// The Lighthouse API key.
    #[arg(env = "SLATE_LIGHTHOUSE_API_KEY", long)]
    pub lighthouse_api_key: Option<String>,
}
