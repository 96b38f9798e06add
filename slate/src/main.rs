use std::sync::Arc;

use clap::Parser as _;
use dotenvy::dotenv;
use slate::cli::{Cli, Commands, RunCmd};
use slate::config::Config;
use slate::server::setup_server;
use slate::utils::logging::init_logging;
use slate::SlateResult;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting slate");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => match run_slate(run_command).await {
            Ok(_) => {
                info!("Slate service stopped");
            }
            Err(e) => {
                error!(error = %e, error_chain = ?e, "Failed to start slate service");
                panic!("Failed to start slate service: {}", e);
            }
        },
    }
}

async fn run_slate(run_cmd: &RunCmd) -> SlateResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    let (address, server_handle) = setup_server(config).await?;
    info!(%address, "Server listening");

    tokio::signal::ctrl_c().await.map_err(slate::SlateError::IoError)?;
    info!("Shutdown signal received");
    server_handle.shutdown().await.map_err(|e| slate::SlateError::ServerError(e.to_string()))?;
    Ok(())
}
