use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::mint::{parse_recipient, MintMode, MintOrchestrator, MintOutcome};
use crate::server::error::MintRouteError;
use crate::server::types::{MintPrepareRequest, MintPrepareResponse, MintSubmitRequest, MintSubmitResponse};

pub fn mint_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/prepare", post(handle_prepare_request))
        .route("/submit", post(handle_submit_request))
        .with_state(config)
}

fn orchestrator(config: &Config) -> MintOrchestrator {
    MintOrchestrator::new(config.storage(), config.chain(), config.mint_params().confirmations)
}

/// Stages the uploads for a caller that signs the mint itself: validates
/// the capture, pins the artifact and its metadata, and returns both
/// references for the caller's own transaction.
#[instrument(skip_all)]
async fn handle_prepare_request(
    State(config): State<Arc<Config>>,
    Json(request): Json<MintPrepareRequest>,
) -> Result<Response, MintRouteError> {
    let image = request.image.unwrap_or_default();

    let outcome = orchestrator(&config).mint(&image, None, MintMode::ClientSigned).await.map_err(|e| {
        error!(error = %e, "Mint preparation failed");
        MintRouteError::from(e)
    })?;

    let MintOutcome::Prepared(prepared) = outcome else {
        return Err(MintRouteError::Upstream("unexpected mint outcome".to_string()));
    };

    info!(metadata_uri = %prepared.metadata.uri, "Mint prepared");
    Ok(Json(MintPrepareResponse {
        success: true,
        metadata_ipfs_uri: prepared.metadata.uri,
        metadata_gateway_url: prepared.metadata.gateway_url,
        image_ipfs_uri: prepared.image.uri,
        image_gateway_url: prepared.image.gateway_url,
        suggested_name: prepared.suggested_name,
        timestamp: prepared.timestamp_ms,
    })
    .into_response())
}

/// Runs the full server-custodied pipeline: validate, pin, simulate,
/// broadcast, confirm, and report the minted token.
#[instrument(skip_all)]
async fn handle_submit_request(
    State(config): State<Arc<Config>>,
    Json(request): Json<MintSubmitRequest>,
) -> Result<Response, MintRouteError> {
    let image = request.image.unwrap_or_default();
    let recipient = request.recipient.as_deref().map(parse_recipient).transpose().map_err(MintRouteError::from)?;

    let outcome = orchestrator(&config).mint(&image, recipient, MintMode::ServerCustodied).await.map_err(|e| {
        error!(error = %e, "Mint submission failed");
        MintRouteError::from(e)
    })?;

    let MintOutcome::Submitted(submitted) = outcome else {
        return Err(MintRouteError::Upstream("unexpected mint outcome".to_string()));
    };

    info!(tx_hash = %submitted.tx_hash, token_id = ?submitted.token_id, "Mint submitted");
    Ok(Json(MintSubmitResponse {
        success: true,
        tx_hash: submitted.tx_hash.to_string(),
        token_uri: submitted.metadata.uri,
        token_uri_http: submitted.metadata.gateway_url,
        image_uri: submitted.image.uri,
        image_uri_http: submitted.image.gateway_url,
        token_id: submitted.token_id.map(|id| id.to_string()),
        minted_to: submitted.minted_to.to_string(),
        block_number: submitted.block_number,
    })
    .into_response())
}
