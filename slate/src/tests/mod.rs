use std::net::SocketAddr;
use std::sync::Arc;

use alloy_primitives::{address, Address, B256, U256};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use httpmock::MockServer;
use slate_chain_client_interface::{ConfirmedTransaction, MintEvent, MockChainClient};
use slate_storage_client_interface::{ContentReference, MockStorageClient};

use crate::cli::ServerParams;
use crate::config::{Config, MintParams};
use crate::server::{setup_server, ServerHandle};
use crate::server::types::{AuthVerifyResponse, ErrorResponse, MintSubmitResponse};

const RECIPIENT: Address = address!("3333333333333333333333333333333333333333");

fn drawing_payload() -> String {
    format!("data:image/png;base64,{}", BASE64.encode(vec![0x42u8; 2048]))
}

async fn serve(storage: MockStorageClient, chain: MockChainClient) -> (SocketAddr, ServerHandle) {
    let config = Arc::new(Config::new(
        ServerParams { host: "127.0.0.1".to_string(), port: 0 },
        MintParams { confirmations: 1, deploy_block: 0 },
        Arc::new(storage),
        Arc::new(chain),
    ));
    setup_server(config).await.expect("server should start")
}

/// A full server-custodied mint through the HTTP surface, followed by the
/// same mint showing up in the gallery replay.
#[tokio::test]
async fn submitted_mint_appears_in_gallery() {
    let gateway = MockServer::start_async().await;
    gateway
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/ipfs/QmMetadata");
            then.status(200).json_body(serde_json::json!({
                "name": "Drawing #1700000000000",
                "image": "ipfs://QmImage",
            }));
        })
        .await;

    let base = gateway.base_url();
    let mut storage = MockStorageClient::new();
    storage.expect_upload_file().returning(|_, _| {
        Ok(ContentReference { uri: "ipfs://QmImage".to_string(), gateway_url: "https://gw/ipfs/QmImage".to_string() })
    });
    storage.expect_upload_json().returning(|_| {
        Ok(ContentReference {
            uri: "ipfs://QmMetadata".to_string(),
            gateway_url: "https://gw/ipfs/QmMetadata".to_string(),
        })
    });
    storage.expect_gateway_url().returning(move |uri| format!("{base}/ipfs/{}", uri.trim_start_matches("ipfs://")));

    let tx_hash = B256::repeat_byte(0xab);
    let mut chain = MockChainClient::new();
    chain
        .expect_simulate_then_send()
        .withf(|to, uri| *to == RECIPIENT && uri == "ipfs://QmMetadata")
        .returning(move |_, _| Ok(tx_hash));
    chain.expect_await_confirmation().returning(|_, _| Ok(ConfirmedTransaction { block_number: 7, logs: vec![] }));
    chain.expect_extract_token_id().returning(|_| Some(U256::from(42u64)));
    chain.expect_get_mint_events().returning(|_| {
        Ok(vec![MintEvent {
            to: RECIPIENT,
            token_id: U256::from(42u64),
            token_uri: "ipfs://QmMetadata".to_string(),
            block_number: 7,
        }])
    });

    let (address, _server_handle) = serve(storage, chain).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{address}/api/v1/mint/submit"))
        .json(&serde_json::json!({ "image": drawing_payload(), "recipient": RECIPIENT.to_string() }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let submitted: MintSubmitResponse = response.json().await.unwrap();
    assert!(submitted.success);
    assert_eq!(submitted.tx_hash, tx_hash.to_string());
    assert_eq!(submitted.token_id.as_deref(), Some("42"));
    assert_eq!(submitted.minted_to.to_lowercase(), RECIPIENT.to_string().to_lowercase());
    assert_eq!(submitted.block_number, 7);

    let gallery: serde_json::Value =
        client.get(format!("http://{address}/api/v1/gallery/recent")).send().await.unwrap().json().await.unwrap();
    let drawings = gallery["drawings"].as_array().unwrap();
    assert_eq!(drawings.len(), 1);
    assert_eq!(drawings[0]["tokenId"], "42");
    assert_eq!(drawings[0]["owner"].as_str().unwrap().to_lowercase(), RECIPIENT.to_string().to_lowercase());
}

#[tokio::test]
async fn empty_canvas_is_rejected_before_any_upload() {
    let mut storage = MockStorageClient::new();
    storage.expect_upload_file().never();
    storage.expect_upload_json().never();
    let chain = MockChainClient::new();

    let (address, _server_handle) = serve(storage, chain).await;
    let tiny = format!("data:image/png;base64,{}", BASE64.encode(vec![0u8; 100]));

    let response = reqwest::Client::new()
        .post(format!("http://{address}/api/v1/mint/prepare"))
        .json(&serde_json::json!({ "image": tiny }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Canvas appears to be empty. Please draw something first.");
}

#[tokio::test]
async fn auth_verify_resolves_custody_address() {
    let custody = address!("1111111111111111111111111111111111111111");
    let storage = MockStorageClient::new();
    let mut chain = MockChainClient::new();
    chain.expect_custody_address_of().withf(|fid| *fid == 12345).returning(move |_| Ok(custody));

    let (address, _server_handle) = serve(storage, chain).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{address}/api/v1/auth/verify"))
        .json(&serde_json::json!({
            "message": "slate.example wants you to sign in with your account fid:12345",
            "signature": "0xdeadbeef",
            "nonce": "abc",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let verified: AuthVerifyResponse = response.json().await.unwrap();
    assert!(verified.success);
    assert_eq!(verified.fid, 12345);
    assert_eq!(verified.address.to_lowercase(), custody.to_string().to_lowercase());

    // Same endpoint, missing signature.
    let response = client
        .post(format!("http://{address}/api/v1/auth/verify"))
        .json(&serde_json::json!({ "message": "fid:1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: ErrorResponse = response.json().await.unwrap();
    assert_eq!(body.error, "Message and signature are required");
}

#[tokio::test]
async fn health_and_fallback_routes() {
    let (address, _server_handle) = serve(MockStorageClient::new(), MockChainClient::new()).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("http://{address}/health")).send().await.unwrap();
    assert_eq!(health.status(), 200);
    assert_eq!(health.text().await.unwrap(), "UP");

    let missing = client.get(format!("http://{address}/api/v1/nope")).send().await.unwrap();
    assert_eq!(missing.status(), 404);

    let webhook = client
        .post(format!("http://{address}/webhook"))
        .json(&serde_json::json!({ "event": "frame_added" }))
        .send()
        .await
        .unwrap();
    assert_eq!(webhook.status(), 200);
    let body: serde_json::Value = webhook.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn shutdown_stops_accepting_connections() {
    let (address, server_handle) = serve(MockStorageClient::new(), MockChainClient::new()).await;
    let client = reqwest::Client::new();

    let health = client.get(format!("http://{address}/health")).send().await.unwrap();
    assert_eq!(health.status(), 200);

    server_handle.shutdown().await.unwrap();

    let refused = client.get(format!("http://{address}/health")).send().await;
    assert!(refused.is_err());
}
