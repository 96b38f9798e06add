use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use slate_storage_client_interface::{
    rewrite_to_gateway, ContentReference, StorageClient, StorageClientError, IPFS_URI_SCHEME,
};
use tracing::debug;

pub const PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const PINATA_GATEWAY_HOST: &str = "gateway.pinata.cloud";

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";
const JWT_SETTING: &str = "SLATE_PINATA_JWT";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinataStorageValidatedArgs {
    pub pinata_jwt: Option<String>,
}

/// Response of the Pinata pinning endpoints.
#[derive(Debug, Deserialize)]
struct PinataPinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

/// Storage client backed by Pinata.
pub struct PinataStorageClient {
    client: reqwest::Client,
    jwt: Option<String>,
    api_url: String,
    gateway_host: String,
}

impl PinataStorageClient {
    pub fn new_with_args(params: &PinataStorageValidatedArgs) -> Self {
        Self {
            client: reqwest::Client::new(),
            jwt: params.pinata_jwt.clone(),
            api_url: PINATA_API_URL.to_string(),
            gateway_host: PINATA_GATEWAY_HOST.to_string(),
        }
    }

    /// Points the client at an alternative endpoint. Used by tests to run
    /// against a local HTTP mock.
    pub fn with_endpoints(
        params: &PinataStorageValidatedArgs,
        api_url: impl Into<String>,
        gateway_host: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            jwt: params.pinata_jwt.clone(),
            api_url: api_url.into(),
            gateway_host: gateway_host.into(),
        }
    }

    fn jwt(&self) -> Result<&str, StorageClientError> {
        self.jwt.as_deref().ok_or(StorageClientError::AuthNotConfigured(JWT_SETTING))
    }

    async fn into_reference(
        &self,
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<ContentReference, StorageClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageClientError::UploadRejected { status, body });
        }

        let body: PinataPinResponse =
            response.json().await.map_err(|source| StorageClientError::Network { operation, source })?;
        let hash = body.ipfs_hash.filter(|h| !h.is_empty()).ok_or(StorageClientError::NoReferenceReturned)?;

        let uri = format!("{}{}", IPFS_URI_SCHEME, hash);
        debug!(%uri, operation, "Pinata pin complete");
        Ok(ContentReference { gateway_url: rewrite_to_gateway(&uri, &self.gateway_host), uri })
    }
}

#[async_trait]
impl StorageClient for PinataStorageClient {
    async fn upload_file(&self, bytes: Vec<u8>, filename: String) -> Result<ContentReference, StorageClientError> {
        let jwt = self.jwt()?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("image/png")
            .map_err(|source| StorageClientError::Network { operation: "upload_file", source })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}{}", self.api_url, PIN_FILE_PATH))
            .bearer_auth(jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|source| StorageClientError::Network { operation: "upload_file", source })?;

        self.into_reference(response, "upload_file").await
    }

    async fn upload_json(&self, document: serde_json::Value) -> Result<ContentReference, StorageClientError> {
        let jwt = self.jwt()?;
        let response = self
            .client
            .post(format!("{}{}", self.api_url, PIN_JSON_PATH))
            .bearer_auth(jwt)
            .json(&json!({ "pinataContent": document }))
            .send()
            .await
            .map_err(|source| StorageClientError::Network { operation: "upload_json", source })?;

        self.into_reference(response, "upload_json").await
    }

    fn gateway_url(&self, uri: &str) -> String {
        rewrite_to_gateway(uri, &self.gateway_host)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer, jwt: Option<&str>) -> PinataStorageClient {
        let params = PinataStorageValidatedArgs { pinata_jwt: jwt.map(String::from) };
        PinataStorageClient::with_endpoints(&params, server.base_url(), PINATA_GATEWAY_HOST)
    }

    #[tokio::test]
    async fn pin_file_returns_ipfs_reference() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path(PIN_FILE_PATH).header("authorization", "Bearer jwt-token");
            then.status(200).json_body(json!({ "IpfsHash": "QmPinataHash", "PinSize": 2048 }));
        });

        let client = client_for(&server, Some("jwt-token"));
        let reference = client.upload_file(vec![0u8; 2048], "drawing.png".to_string()).await.unwrap();

        mock.assert();
        assert_eq!(reference.uri, "ipfs://QmPinataHash");
        assert_eq!(reference.gateway_url, "https://gateway.pinata.cloud/ipfs/QmPinataHash");
    }

    #[tokio::test]
    async fn pin_json_posts_wrapped_content() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(PIN_JSON_PATH)
                .json_body_partial(r#"{ "pinataContent": { "name": "Drawing #1" } }"#);
            then.status(200).json_body(json!({ "IpfsHash": "QmMetaHash" }));
        });

        let client = client_for(&server, Some("jwt-token"));
        let reference = client.upload_json(json!({ "name": "Drawing #1" })).await.unwrap();

        mock.assert();
        assert_eq!(reference.uri, "ipfs://QmMetaHash");
    }

    #[tokio::test]
    async fn missing_jwt_fails_without_network_call() {
        let server = MockServer::start();
        let client = client_for(&server, None);

        let err = client.upload_json(json!({})).await.unwrap_err();
        assert!(matches!(err, StorageClientError::AuthNotConfigured(_)));
    }

    #[tokio::test]
    async fn empty_hash_is_no_reference_returned() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PIN_JSON_PATH);
            then.status(200).json_body(json!({ "IpfsHash": "" }));
        });

        let client = client_for(&server, Some("jwt-token"));
        let err = client.upload_json(json!({})).await.unwrap_err();
        assert!(matches!(err, StorageClientError::NoReferenceReturned));
    }
}
