pub mod metadata;
pub mod validator;

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use chrono::Utc;
use slate_chain_client_interface::{ChainClient, ChainClientError};
use slate_storage_client_interface::{ContentReference, StorageClient, StorageClientError};
use tracing::{debug, info};

use crate::mint::validator::ValidationError;

/// Who signs the mint transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintMode {
    /// The caller holds the wallet; the pipeline ends after staging the
    /// uploads and returns the prepared references.
    ClientSigned,
    /// This process holds signing authority and drives the transaction
    /// through confirmation itself.
    ServerCustodied,
}

/// Stages of one mint attempt, in order. `Failed` is reachable from any of
/// them by returning the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintStage {
    Validating,
    UploadingArtifact,
    UploadingMetadata,
    Submitting,
    AwaitingExternalSignature,
    Confirming,
    Completed,
}

/// Staged uploads for a caller that signs the transaction itself.
#[derive(Debug, Clone)]
pub struct PreparedMint {
    pub metadata: ContentReference,
    pub image: ContentReference,
    pub suggested_name: String,
    pub timestamp_ms: i64,
}

/// A server-custodied mint that reached the chain.
///
/// `token_id` may be absent even for a successful mint (no decodable mint
/// event in the receipt); the transaction hash is the source of truth.
#[derive(Debug, Clone)]
pub struct SubmittedMint {
    pub tx_hash: B256,
    pub metadata: ContentReference,
    pub image: ContentReference,
    pub token_id: Option<U256>,
    pub minted_to: Address,
    pub block_number: u64,
}

/// What a mint attempt produced; callers pattern-match on the variant.
#[derive(Debug, Clone)]
pub enum MintOutcome {
    Prepared(PreparedMint),
    Submitted(SubmittedMint),
}

#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error(transparent)]
    Storage(#[from] StorageClientError),

    #[error(transparent)]
    Chain(#[from] ChainClientError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a 20-byte hex chain address. Checksum casing is not enforced.
pub fn parse_recipient(address: &str) -> Result<Address, MintError> {
    Address::from_str(address).map_err(|_| MintError::InvalidRecipient(address.to_string()))
}

/// Sequences one mint attempt: validate, upload artifact, upload metadata,
/// then either hand the references back (client-signed) or submit and
/// confirm on-chain (server-custodied).
///
/// The staging steps run at-least-once: a failure after a successful upload
/// leaves orphaned but harmless content-store entries, and no compensating
/// deletion is attempted since content-addressed storage has no undo. There
/// is no idempotency key either; each invocation derives a fresh
/// timestamp-based name and, in server-custodied mode, a fresh transaction.
pub struct MintOrchestrator {
    storage: Arc<dyn StorageClient>,
    chain: Arc<dyn ChainClient>,
    confirmations: u64,
}

impl MintOrchestrator {
    pub fn new(storage: Arc<dyn StorageClient>, chain: Arc<dyn ChainClient>, confirmations: u64) -> Self {
        Self { storage, chain, confirmations }
    }

    pub async fn mint(
        &self,
        image_data: &str,
        recipient: Option<Address>,
        mode: MintMode,
    ) -> Result<MintOutcome, MintError> {
        debug!(stage = ?MintStage::Validating, "Validating canvas capture");
        let bytes = validator::validate_artifact(image_data)?;

        let timestamp_ms = Utc::now().timestamp_millis();
        let filename = format!("drawing-{timestamp_ms}.png");

        debug!(stage = ?MintStage::UploadingArtifact, size = bytes.len(), %filename, "Uploading artifact");
        let image = self.storage.upload_file(bytes, filename).await?;

        // The metadata document embeds the artifact reference, so this upload
        // cannot start before the previous one finished.
        debug!(stage = ?MintStage::UploadingMetadata, image_uri = %image.uri, "Uploading metadata");
        let document = metadata::build_metadata(&image.uri, timestamp_ms);
        let metadata = self.storage.upload_json(serde_json::to_value(&document)?).await?;

        match mode {
            MintMode::ClientSigned => {
                debug!(stage = ?MintStage::AwaitingExternalSignature, metadata_uri = %metadata.uri, "Staging complete");
                Ok(MintOutcome::Prepared(PreparedMint {
                    metadata,
                    image,
                    suggested_name: document.name,
                    timestamp_ms,
                }))
            }
            MintMode::ServerCustodied => {
                let minted_to = match recipient {
                    Some(recipient) => recipient,
                    None => self.chain.signer_address()?,
                };

                debug!(stage = ?MintStage::Submitting, recipient = %minted_to, "Submitting mint transaction");
                let tx_hash = self.chain.simulate_then_send(minted_to, metadata.uri.clone()).await?;

                debug!(stage = ?MintStage::Confirming, tx_hash = %tx_hash, "Awaiting confirmation");
                let confirmed = self.chain.await_confirmation(tx_hash, self.confirmations).await?;
                let token_id = self.chain.extract_token_id(&confirmed.logs);

                info!(stage = ?MintStage::Completed, tx_hash = %tx_hash, ?token_id, "Mint completed");
                Ok(MintOutcome::Submitted(SubmittedMint {
                    tx_hash,
                    metadata,
                    image,
                    token_id,
                    minted_to,
                    block_number: confirmed.block_number,
                }))
            }
        }
    }
}
