//! Decoder for the analysis results document.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;

use crate::document::ResultsDocument;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decodes a [`ResultsDocument`] from raw bytes.
///
/// Gzip-compressed input is detected by its magic bytes and inflated first,
/// so documents published with `--gzip` load the same way as plain ones.
///
/// # Errors
///
/// Returns an error if the bytes are not a (possibly gzipped) JSON results
/// document.
pub fn parse_document(bytes: &[u8]) -> Result<ResultsDocument> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut inflated)
            .context("Failed to decompress gzip results document")?;
        return decode_json(&inflated);
    }

    decode_json(bytes)
}

fn decode_json(bytes: &[u8]) -> Result<ResultsDocument> {
    serde_json::from_slice(bytes).context("Results document is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "updated_at": "2026-01-10T14:00:00+00:00",
        "resorts": [
            {
                "resort_name": "Stevens Pass",
                "resort_key": "stevens_pass",
                "cameras": [
                    {
                        "camera_name": "Skyline Chair",
                        "image_url": "https://example.com/skyline.jpg",
                        "is_base64": false,
                        "rating": {
                            "confidence": 8,
                            "notes": "Fresh corduroy",
                            "categories": { "snow_quality": 9, "visibility": null }
                        },
                        "error": null
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_empty_bytes_fails() {
        assert!(parse_document(&[]).is_err());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let invalid_bytes = vec![0xFF, 0xFE, 0x00, 0x01];
        assert!(parse_document(&invalid_bytes).is_err());
    }

    #[test]
    fn test_parse_valid_minimal_document() {
        let document = parse_document(MINIMAL.as_bytes()).unwrap();

        assert_eq!(document.updated_at, "2026-01-10T14:00:00+00:00");
        assert_eq!(document.resorts.len(), 1);
        let camera = &document.resorts[0].cameras[0];
        assert_eq!(camera.camera_name, "Skyline Chair");
        assert_eq!(camera.rating.as_ref().unwrap().notes, "Fresh corduroy");
    }

    #[test]
    fn test_parse_missing_lists_default_to_empty() {
        let document = parse_document(br#"{ "updated_at": "x" }"#).unwrap();
        assert!(document.resorts.is_empty());

        let document =
            parse_document(br#"{ "resorts": [ { "resort_name": "A", "resort_key": "a" } ] }"#)
                .unwrap();
        assert!(document.resorts[0].cameras.is_empty());
    }

    #[test]
    fn test_parse_gzip_matches_plain() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(MINIMAL.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(
            parse_document(&compressed).unwrap(),
            parse_document(MINIMAL.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_parse_truncated_gzip_fails() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(MINIMAL.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        assert!(parse_document(&compressed[..compressed.len() / 2]).is_err());
    }
}
