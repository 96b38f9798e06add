use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, instrument};

use crate::config::Config;
use crate::gallery::{GalleryIndexer, DEFAULT_GALLERY_LIMIT};
use crate::server::error::GalleryRouteError;
use crate::server::types::{GalleryQuery, GalleryResponse};

pub fn gallery_router(config: Arc<Config>) -> Router {
    Router::new().route("/recent", get(handle_recent_request)).with_state(config)
}

/// The newest drawings, rebuilt from chain history on every request.
#[instrument(skip(config))]
async fn handle_recent_request(
    State(config): State<Arc<Config>>,
    Query(query): Query<GalleryQuery>,
) -> Result<Response, GalleryRouteError> {
    let limit = query.limit.unwrap_or(DEFAULT_GALLERY_LIMIT);

    let indexer = GalleryIndexer::new(config.chain(), config.storage(), config.mint_params().deploy_block);
    let drawings = indexer.list_recent(limit).await.map_err(|e| {
        error!(error = %e, "Gallery replay failed");
        GalleryRouteError::from(e)
    })?;

    Ok(Json(GalleryResponse { success: true, drawings }).into_response())
}
