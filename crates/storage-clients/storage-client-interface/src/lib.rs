use async_trait::async_trait;
use mockall::automock;
use mockall::predicate::*;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const IPFS_URI_SCHEME: &str = "ipfs://";

/// A content-addressed reference to an uploaded object: the canonical
/// `ipfs://<cid>` URI plus the HTTP gateway URL of the provider that pinned it.
///
/// Immutable once issued; the gateway URL is only valid for the provider that
/// produced the reference, which is why both travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentReference {
    pub uri: String,
    pub gateway_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageClientError {
    /// The provider credential is not configured. Operator error, not user error.
    #[error("{0} is not configured. Set it in the environment or pass it on the command line.")]
    AuthNotConfigured(&'static str),

    /// The provider answered with a non-success status.
    #[error("Upload rejected by storage provider (status {status}): {body}")]
    UploadRejected { status: StatusCode, body: String },

    /// The provider answered 2xx but the response carried no content identifier.
    #[error("Storage provider returned no content identifier")]
    NoReferenceReturned,

    /// Transport-level failure talking to the provider.
    #[error("Network error during {operation}: {source}")]
    Network { operation: &'static str, source: reqwest::Error },
}

/// Trait for every content-addressed storage provider to implement.
///
/// Callers depend only on these three operations, never on provider request
/// shapes. Failures are terminal for the current attempt; retrying is a
/// caller decision.
#[automock]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Upload a binary artifact under the given filename and return its
    /// content reference.
    async fn upload_file(&self, bytes: Vec<u8>, filename: String) -> Result<ContentReference, StorageClientError>;

    /// Upload a JSON document and return its content reference.
    async fn upload_json(&self, document: serde_json::Value) -> Result<ContentReference, StorageClientError>;

    /// Rewrite an `ipfs://` URI to this provider's HTTP gateway. Pure and
    /// idempotent: an input already in HTTP form is returned unchanged.
    fn gateway_url(&self, uri: &str) -> String;
}

/// Shared `ipfs://<cid>` -> `https://<gateway_host>/ipfs/<cid>` rewrite used
/// by the provider implementations.
pub fn rewrite_to_gateway(uri: &str, gateway_host: &str) -> String {
    match uri.strip_prefix(IPFS_URI_SCHEME) {
        Some(cid) => format!("https://{}/ipfs/{}", gateway_host, cid),
        None => uri.to_string(),
    }
}
