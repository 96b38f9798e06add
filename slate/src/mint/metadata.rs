use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const METADATA_DESCRIPTION: &str = "A unique hand-drawn NFT created on Slate";
pub const PLATFORM_NAME: &str = "Slate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: String,
}

/// The NFT metadata document. Uploaded once per mint; content addressing
/// makes any later mutation a different document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttribute>,
}

/// Builds the metadata document for an uploaded drawing. Deterministic given
/// its inputs; the name is derived from the mint timestamp, not user text.
pub fn build_metadata(image_uri: &str, timestamp_ms: i64) -> MintMetadata {
    let created = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    MintMetadata {
        name: format!("Drawing #{timestamp_ms}"),
        description: METADATA_DESCRIPTION.to_string(),
        image: image_uri.to_string(),
        attributes: vec![
            MetadataAttribute { trait_type: "Created".to_string(), value: created },
            MetadataAttribute { trait_type: "Platform".to_string(), value: PLATFORM_NAME.to_string() },
        ],
    }
}
