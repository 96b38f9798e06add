use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use slate_chain_client_interface::ChainClientError;
use slate_storage_client_interface::StorageClientError;

use crate::error::SlateError;
use crate::mint::MintError;
use crate::server::types::ErrorResponse;

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Errors of the mint routes. Status mapping: input errors are the caller's
/// to fix (400); configuration errors are the operator's (500, with the
/// setting named); everything else is an upstream failure (500).
#[derive(Debug, thiserror::Error)]
pub enum MintRouteError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),
}

impl From<MintError> for MintRouteError {
    fn from(e: MintError) -> Self {
        match &e {
            MintError::Validation(_) | MintError::InvalidRecipient(_) => Self::InvalidInput(e.to_string()),
            MintError::Storage(StorageClientError::AuthNotConfigured(_))
            | MintError::Chain(ChainClientError::MissingCredential(_))
            | MintError::Chain(ChainClientError::MissingContractAddress(_)) => Self::Configuration(e.to_string()),
            _ => Self::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for MintRouteError {
    fn into_response(self) -> Response {
        match self {
            MintRouteError::InvalidInput(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            MintRouteError::Configuration(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
            MintRouteError::Upstream(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRouteError {
    #[error("Message and signature are required")]
    MissingFields,

    #[error("Invalid message format: FID not found")]
    MalformedMessage,

    #[error("Failed to resolve custody address: {0}")]
    RegistryLookup(#[from] ChainClientError),
}

impl IntoResponse for AuthRouteError {
    fn into_response(self) -> Response {
        match self {
            AuthRouteError::MissingFields | AuthRouteError::MalformedMessage => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            AuthRouteError::RegistryLookup(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryRouteError {
    #[error("Failed to load gallery: {0}")]
    Replay(String),
}

impl From<SlateError> for GalleryRouteError {
    fn from(e: SlateError) -> Self {
        Self::Replay(e.to_string())
    }
}

impl IntoResponse for GalleryRouteError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}
