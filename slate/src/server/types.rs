use serde::{Deserialize, Serialize};

use crate::gallery::GalleryEntry;

/// JSON error envelope shared by every route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct MintPrepareRequest {
    /// Base64 PNG capture, with or without the data-URI prefix. Absent and
    /// empty are treated the same so the validator owns the error message.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintPrepareResponse {
    pub success: bool,
    pub metadata_ipfs_uri: String,
    pub metadata_gateway_url: String,
    pub image_ipfs_uri: String,
    pub image_gateway_url: String,
    pub suggested_name: String,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct MintSubmitRequest {
    #[serde(default)]
    pub image: Option<String>,
    /// Mint target; the signer address when absent.
    #[serde(default)]
    pub recipient: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSubmitResponse {
    pub success: bool,
    pub tx_hash: String,
    pub token_uri: String,
    pub token_uri_http: String,
    pub image_uri: String,
    pub image_uri_http: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub minted_to: String,
    pub block_number: u64,
}

#[derive(Debug, Deserialize)]
pub struct AuthVerifyRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthVerifyResponse {
    pub success: bool,
    pub fid: u64,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub drawings: Vec<GalleryEntry>,
}
