use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slate_storage_client_interface::{
    rewrite_to_gateway, ContentReference, StorageClient, StorageClientError, IPFS_URI_SCHEME,
};
use tracing::debug;

pub const LIGHTHOUSE_UPLOAD_URL: &str = "https://upload.lighthouse.storage/api/v0/add";
pub const LIGHTHOUSE_GATEWAY_HOST: &str = "gateway.lighthouse.storage";

const API_KEY_SETTING: &str = "SLATE_LIGHTHOUSE_API_KEY";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LighthouseStorageValidatedArgs {
    pub lighthouse_api_key: Option<String>,
}

/// Response of the Lighthouse `/api/v0/add` endpoint.
#[derive(Debug, Deserialize)]
struct LighthouseAddResponse {
    #[serde(rename = "Hash")]
    hash: Option<String>,
}

/// Storage client backed by Lighthouse.
pub struct LighthouseStorageClient {
    client: reqwest::Client,
    api_key: Option<String>,
    upload_url: String,
    gateway_host: String,
}

impl LighthouseStorageClient {
    pub fn new_with_args(params: &LighthouseStorageValidatedArgs) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: params.lighthouse_api_key.clone(),
            upload_url: LIGHTHOUSE_UPLOAD_URL.to_string(),
            gateway_host: LIGHTHOUSE_GATEWAY_HOST.to_string(),
        }
    }

    /// Points the client at an alternative endpoint. Used by tests to run
    /// against a local HTTP mock.
    pub fn with_endpoints(
        params: &LighthouseStorageValidatedArgs,
        upload_url: impl Into<String>,
        gateway_host: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: params.lighthouse_api_key.clone(),
            upload_url: upload_url.into(),
            gateway_host: gateway_host.into(),
        }
    }

    fn api_key(&self) -> Result<&str, StorageClientError> {
        self.api_key.as_deref().ok_or(StorageClientError::AuthNotConfigured(API_KEY_SETTING))
    }

    async fn upload_part(
        &self,
        part: reqwest::multipart::Part,
        operation: &'static str,
    ) -> Result<ContentReference, StorageClientError> {
        let api_key = self.api_key()?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|source| StorageClientError::Network { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageClientError::UploadRejected { status, body });
        }

        let body: LighthouseAddResponse =
            response.json().await.map_err(|source| StorageClientError::Network { operation, source })?;
        let hash = body.hash.filter(|h| !h.is_empty()).ok_or(StorageClientError::NoReferenceReturned)?;

        let uri = format!("{}{}", IPFS_URI_SCHEME, hash);
        debug!(%uri, operation, "Lighthouse upload complete");
        Ok(ContentReference { gateway_url: rewrite_to_gateway(&uri, &self.gateway_host), uri })
    }
}

#[async_trait]
impl StorageClient for LighthouseStorageClient {
    async fn upload_file(&self, bytes: Vec<u8>, filename: String) -> Result<ContentReference, StorageClientError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("image/png")
            .map_err(|source| StorageClientError::Network { operation: "upload_file", source })?;
        self.upload_part(part, "upload_file").await
    }

    async fn upload_json(&self, document: serde_json::Value) -> Result<ContentReference, StorageClientError> {
        let body = serde_json::to_vec_pretty(&document).unwrap_or_default();
        let part = reqwest::multipart::Part::bytes(body)
            .file_name("metadata.json")
            .mime_str("application/json")
            .map_err(|source| StorageClientError::Network { operation: "upload_json", source })?;
        self.upload_part(part, "upload_json").await
    }

    fn gateway_url(&self, uri: &str) -> String {
        rewrite_to_gateway(uri, &self.gateway_host)
    }
}
