//! Where the results document is read from.
//!
//! The analysis run publishes one JSON document per cycle; the ranking side
//! reads it back from a local file, a URL, or S3. Retrieval is the only part
//! of the pipeline that can fail, so it is retried before giving up.

use anyhow::{Context, Result, bail};
use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::document::ResultsDocument;
use crate::fetch::{BasicClient, fetch_bytes};
use crate::parser::parse_document;

/// Location of a results document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
    S3 { bucket: String, key: String },
}

impl FromStr for DocumentSource {
    type Err = anyhow::Error;

    /// `s3://bucket/key`, `http(s)://...`, or a filesystem path.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("s3://") {
            let Some((bucket, key)) = rest.split_once('/') else {
                bail!("S3 source '{s}' is missing an object key");
            };
            if bucket.is_empty() || key.is_empty() {
                bail!("S3 source '{s}' needs both a bucket and a key");
            }
            return Ok(Self::S3 {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Url(s.to_string()));
        }

        if s.is_empty() {
            bail!("Document source must not be empty");
        }

        Ok(Self::File(PathBuf::from(s)))
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::S3 { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}

/// How often and how patiently retrieval is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Retrieves and decodes the results document at `source`.
///
/// Retrieval failures are retried per `retry`; a document that arrives but
/// does not decode is reported immediately.
///
/// # Errors
///
/// Returns an error if the document could not be retrieved after every
/// attempt, or if it is not a valid results document.
#[tracing::instrument(skip(source, retry), fields(source = %source, attempts = retry.attempts))]
pub async fn load_document(source: &DocumentSource, retry: &RetryPolicy) -> Result<ResultsDocument> {
    let attempts = retry.attempts.max(1);
    let mut attempt = 1;

    loop {
        match read_source(source).await {
            Ok(bytes) => {
                let document = parse_document(&bytes)
                    .with_context(|| format!("Failed to decode results document from {source}"))?;
                info!(
                    resorts = document.resorts.len(),
                    updated_at = %document.updated_at,
                    "Results document loaded"
                );
                return Ok(document);
            }
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "Results document retrieval failed, retrying");
                tokio::time::sleep(retry.delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e.context(format!(
                    "Could not retrieve results document from {source} after {attempts} attempt(s); \
                     retry once the analysis run has published it"
                )));
            }
        }
    }
}

async fn read_source(source: &DocumentSource) -> Result<Bytes> {
    match source {
        DocumentSource::File(path) => {
            let contents = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Bytes::from(contents))
        }
        DocumentSource::Url(url) => {
            let client = BasicClient::new()?;
            fetch_bytes(&client, url).await
        }
        DocumentSource::S3 { bucket, key } => {
            let config = aws_config::load_from_env().await;
            let s3 = aws_sdk_s3::Client::new(&config);
            read_s3_object(&s3, bucket, key).await
        }
    }
}

/// Downloads one object from S3 into memory.
pub async fn read_s3_object(client: &aws_sdk_s3::Client, bucket: &str, key: &str) -> Result<Bytes> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .with_context(|| format!("S3 GetObject failed for s3://{bucket}/{key}"))?;

    let body = resp
        .body
        .collect()
        .await
        .with_context(|| format!("Failed to read body of s3://{bucket}/{key}"))?;

    Ok(body.into_bytes())
}
