//! Persistence for the ranked results document.
//!
//! Supports writing pretty JSON to disk and uploading JSON to S3, optionally
//! gzip-compressed.

use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Serializes `value` as pretty-printed JSON to `path`, creating parent
/// directories as needed.
pub fn write_json_file(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, &body).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = body.len(), "Wrote JSON document");
    Ok(())
}

/// Gzip-compresses a buffer with the default compression level.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Serializes a value to JSON and uploads it to an S3 bucket with
/// `application/json` content type, gzip-encoded when `compress` is set.
#[tracing::instrument(skip(client, value))]
pub async fn write_json_to_s3(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    value: &impl Serialize,
    compress: bool,
) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let body = if compress { gzip(&json)? } else { json };
    debug!(bytes = body.len(), "Uploading JSON document");

    let mut request = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body));
    if compress {
        request = request.content_encoding("gzip");
    }

    request
        .send()
        .await
        .with_context(|| format!("S3 PutObject failed for s3://{bucket}/{key}"))?;

    info!("S3 upload complete");
    Ok(())
}
