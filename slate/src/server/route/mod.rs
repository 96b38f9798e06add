pub mod auth;
pub mod gallery;
pub mod mint;
pub mod public;

use std::sync::Arc;

use axum::Router;

use crate::config::Config;

/// Assembles the full route tree: the versioned API surface under
/// `/api/v1`, the public routes at the root, and the 404 fallback.
pub fn server_router(config: Arc<Config>) -> Router {
    let api = Router::new()
        .nest("/mint", mint::mint_router(config.clone()))
        .nest("/auth", auth::auth_router(config.clone()))
        .nest("/gallery", gallery::gallery_router(config));

    Router::new().merge(public::public_router()).nest("/api/v1", api).fallback(public::handler_404)
}
