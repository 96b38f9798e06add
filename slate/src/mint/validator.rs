use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;

/// Accepted data-URI prefix for canvas captures.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Below this decoded size the capture cannot be a real sketch: a completely
/// white 500x500 canvas still compresses to ~2KB, so anything under 1000
/// bytes is a blank or near-blank canvas.
pub const MIN_SUBSTANTIVE_BYTES: usize = 1000;

lazy_static! {
    static ref BASE64_RE: Regex = Regex::new("^[A-Za-z0-9+/]+=*$").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Image data is required")]
    MissingImage,

    #[error("Invalid image format. Must be base64 PNG.")]
    InvalidFormat,

    #[error("Canvas appears to be empty. Please draw something first.")]
    EmptyCanvas,
}

/// Whether the payload is a PNG data URI or a plain base64 string.
pub fn is_well_formed(payload: &str) -> bool {
    if payload.starts_with(PNG_DATA_URI_PREFIX) {
        return true;
    }
    BASE64_RE.is_match(payload)
}

/// Strips any data-URI prefix and decodes the base64 body.
pub fn extract_encoded_bytes(payload: &str) -> Result<Vec<u8>, ValidationError> {
    let encoded = payload.strip_prefix(PNG_DATA_URI_PREFIX).unwrap_or(payload);
    BASE64.decode(encoded).map_err(|_| ValidationError::InvalidFormat)
}

/// Whether the decoded capture is large enough to be a real drawing.
pub fn is_substantive(bytes: &[u8]) -> bool {
    bytes.len() >= MIN_SUBSTANTIVE_BYTES
}

/// Full validation of a submitted capture. Pure; no I/O.
pub fn validate_artifact(payload: &str) -> Result<Vec<u8>, ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::MissingImage);
    }
    if !is_well_formed(payload) {
        return Err(ValidationError::InvalidFormat);
    }
    let bytes = extract_encoded_bytes(payload)?;
    if !is_substantive(&bytes) {
        return Err(ValidationError::EmptyCanvas);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn encoded_payload(len: usize) -> String {
        BASE64.encode(vec![0x42u8; len])
    }

    #[rstest]
    #[case("not base64 at all!")]
    #[case("data:image/jpeg;base64,AAAA")]
    #[case("hello world")]
    #[case("AAA A")]
    fn malformed_payloads_are_rejected(#[case] payload: &str) {
        assert_eq!(validate_artifact(payload), Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn empty_payload_is_missing_image() {
        assert_eq!(validate_artifact(""), Err(ValidationError::MissingImage));
    }

    #[rstest]
    #[case(MIN_SUBSTANTIVE_BYTES - 1, false)]
    #[case(MIN_SUBSTANTIVE_BYTES, true)]
    #[case(MIN_SUBSTANTIVE_BYTES + 1, true)]
    fn substantive_threshold_boundary(#[case] len: usize, #[case] accepted: bool) {
        let result = validate_artifact(&encoded_payload(len));
        if accepted {
            assert_eq!(result.unwrap().len(), len);
        } else {
            assert_eq!(result, Err(ValidationError::EmptyCanvas));
        }
    }

    #[test]
    fn data_uri_prefix_is_stripped() {
        let payload = format!("{}{}", PNG_DATA_URI_PREFIX, encoded_payload(2048));
        let bytes = validate_artifact(&payload).unwrap();
        assert_eq!(bytes.len(), 2048);
    }

    #[test]
    fn raw_base64_is_accepted() {
        assert!(is_well_formed(&encoded_payload(16)));
    }
}
