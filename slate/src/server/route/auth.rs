use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument};

use crate::config::Config;
use crate::server::error::AuthRouteError;
use crate::server::types::{AuthVerifyRequest, AuthVerifyResponse};

lazy_static! {
    /// The fid claim embedded in a sign-in message, e.g. `fid:12345`.
    static ref FID_RE: Regex = Regex::new(r"fid:(\d+)").expect("valid regex");
}

pub fn auth_router(config: Arc<Config>) -> Router {
    Router::new().route("/verify", post(handle_verify_request)).with_state(config)
}

/// Resolves the custody address for the fid claimed in a sign-in message.
///
/// TODO: verify the SIWF signature against the resolved custody address
/// before trusting the fid claim; today any syntactically valid message
/// passes.
#[instrument(skip_all)]
async fn handle_verify_request(
    State(config): State<Arc<Config>>,
    Json(request): Json<AuthVerifyRequest>,
) -> Result<Response, AuthRouteError> {
    let message = request.message.filter(|m| !m.is_empty()).ok_or(AuthRouteError::MissingFields)?;
    request.signature.filter(|s| !s.is_empty()).ok_or(AuthRouteError::MissingFields)?;

    let fid: u64 = FID_RE
        .captures(&message)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or(AuthRouteError::MalformedMessage)?;

    let address = config.chain().custody_address_of(fid).await?;

    info!(fid, custody = %address, "Sign-in verified");
    Ok(Json(AuthVerifyResponse { success: true, fid, address: address.to_string() }).into_response())
}
