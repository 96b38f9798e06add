use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use slate_chain_client_interface::{ChainClient, MintEvent};
use slate_storage_client_interface::StorageClient;
use tracing::{debug, warn};

use crate::error::SlateResult;

/// Default page size when the caller does not ask for one.
pub const DEFAULT_GALLERY_LIMIT: usize = 10;

/// One drawing in the gallery, newest first. Serialized straight into the
/// route response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub token_id: String,
    pub owner: String,
    pub name: String,
    pub image_url: String,
    pub token_uri: String,
    pub block_number: u64,
}

/// The subset of the metadata document the gallery renders. Unknown fields
/// are ignored so older or foreign documents still display.
#[derive(Debug, Deserialize)]
struct GalleryMetadata {
    name: Option<String>,
    image: Option<String>,
}

/// Rebuilds the gallery from chain history on every request. There is no
/// database: mint events are the index, and the metadata documents are
/// fetched from the content gateway on demand.
pub struct GalleryIndexer {
    chain: Arc<dyn ChainClient>,
    storage: Arc<dyn StorageClient>,
    http: reqwest::Client,
    floor_block: u64,
}

impl GalleryIndexer {
    pub fn new(chain: Arc<dyn ChainClient>, storage: Arc<dyn StorageClient>, floor_block: u64) -> Self {
        Self { chain, storage, http: reqwest::Client::new(), floor_block }
    }

    /// The newest `limit` drawings. Entries whose metadata cannot be fetched
    /// or parsed are dropped rather than failing the whole page.
    pub async fn list_recent(&self, limit: usize) -> SlateResult<Vec<GalleryEntry>> {
        let events = self.chain.get_mint_events(self.floor_block).await?;
        debug!(total = events.len(), limit, "Replayed mint events");

        let newest_first: Vec<MintEvent> = events.into_iter().rev().take(limit).collect();
        let resolved = join_all(newest_first.iter().map(|event| self.resolve_entry(event))).await;

        Ok(resolved.into_iter().flatten().collect())
    }

    async fn resolve_entry(&self, event: &MintEvent) -> Option<GalleryEntry> {
        let metadata_url = self.storage.gateway_url(&event.token_uri);

        let metadata = match self.fetch_metadata(&metadata_url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(token_id = %event.token_id, url = %metadata_url, error = %e, "Dropping gallery entry");
                return None;
            }
        };

        let Some(image) = metadata.image else {
            warn!(token_id = %event.token_id, "Dropping gallery entry with no image in metadata");
            return None;
        };

        let name = metadata.name.unwrap_or_else(|| format!("Drawing #{}", event.token_id));
        let image_url = self.storage.gateway_url(&image);

        Some(GalleryEntry {
            token_id: event.token_id.to_string(),
            owner: event.to.to_string(),
            name,
            image_url,
            token_uri: event.token_uri.clone(),
            block_number: event.block_number,
        })
    }

    async fn fetch_metadata(&self, url: &str) -> Result<GalleryMetadata, reqwest::Error> {
        self.http.get(url).send().await?.error_for_status()?.json::<GalleryMetadata>().await
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, U256};
    use httpmock::MockServer;
    use slate_chain_client_interface::MockChainClient;
    use slate_storage_client_interface::MockStorageClient;

    use super::*;

    fn mint_event(index: u64) -> MintEvent {
        MintEvent {
            to: address!("1111111111111111111111111111111111111111"),
            token_id: U256::from(index),
            token_uri: format!("ipfs://QmToken{index}"),
            block_number: 100 + index,
        }
    }

    /// 15 mints on chain, a page of 10 requested, 2 of the page's metadata
    /// documents broken: the page holds the 8 resolvable newest entries in
    /// descending mint order.
    #[tokio::test]
    async fn newest_first_page_drops_broken_entries() {
        let server = MockServer::start_async().await;

        for index in 0..15u64 {
            server
                .mock_async(|when, then| {
                    when.method(httpmock::Method::GET).path(format!("/ipfs/QmToken{index}"));
                    match index {
                        12 => then.status(404),
                        9 => then.status(200).body("not json"),
                        _ => then.status(200).json_body(serde_json::json!({
                            "name": format!("Drawing #{index}"),
                            "image": format!("ipfs://QmImage{index}"),
                        })),
                    };
                })
                .await;
        }

        let mut chain = MockChainClient::new();
        chain
            .expect_get_mint_events()
            .withf(|from_block| *from_block == 50)
            .returning(|_| Ok((0..15u64).map(mint_event).collect()));

        let base = server.base_url();
        let mut storage = MockStorageClient::new();
        storage
            .expect_gateway_url()
            .returning(move |uri| format!("{base}/ipfs/{}", uri.trim_start_matches("ipfs://")));

        let indexer = GalleryIndexer::new(Arc::new(chain), Arc::new(storage), 50);
        let entries = indexer.list_recent(10).await.unwrap();

        // Page spans token ids 14..=5; 12 and 9 are dropped.
        let ids: Vec<String> = entries.iter().map(|e| e.token_id.clone()).collect();
        assert_eq!(ids, vec!["14", "13", "11", "10", "8", "7", "6", "5"]);
        assert_eq!(entries[0].name, "Drawing #14");
        assert!(entries[0].image_url.ends_with("/ipfs/QmImage14"));
        assert_eq!(entries[0].block_number, 114);
    }

    #[tokio::test]
    async fn empty_history_yields_empty_page() {
        let mut chain = MockChainClient::new();
        chain.expect_get_mint_events().returning(|_| Ok(vec![]));
        let storage = MockStorageClient::new();

        let indexer = GalleryIndexer::new(Arc::new(chain), Arc::new(storage), 0);
        let entries = indexer.list_recent(DEFAULT_GALLERY_LIMIT).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn missing_name_falls_back_to_token_id() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/ipfs/QmToken3");
                then.status(200).json_body(serde_json::json!({ "image": "ipfs://QmImage3" }));
            })
            .await;

        let mut chain = MockChainClient::new();
        chain.expect_get_mint_events().returning(|_| Ok(vec![mint_event(3)]));

        let base = server.base_url();
        let mut storage = MockStorageClient::new();
        storage
            .expect_gateway_url()
            .returning(move |uri| format!("{base}/ipfs/{}", uri.trim_start_matches("ipfs://")));

        let indexer = GalleryIndexer::new(Arc::new(chain), Arc::new(storage), 0);
        let entries = indexer.list_recent(10).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Drawing #3");
    }
}
