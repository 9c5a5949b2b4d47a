//! # Off-chain Metadata Store
//!
//! Create-only association between a stream's parties, token, and a
//! human-readable tag. There is no update or delete path: a record is
//! written once when a stream is created and read back by listing views.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paystream_core::Address;

/// Off-chain record keyed by tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub streamer: Address,
    pub recipient: Address,
    pub token_address: Address,
    pub tag: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Metadata write failed: {0}")]
    WriteFailed(String),
}

/// Store port for stream records
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn create_record(&self, record: &StreamRecord) -> Result<StreamRecord, MetadataError>;
}

/// HTTP-backed store posting records as JSON
pub struct HttpMetadataStore {
    http: reqwest::Client,
    url: String,
}

impl HttpMetadataStore {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Every field must be present before the request goes out
    fn validate(record: &StreamRecord) -> Result<(), MetadataError> {
        if record.streamer.is_zero() {
            return Err(MetadataError::MissingField("streamer"));
        }
        if record.recipient.is_zero() {
            return Err(MetadataError::MissingField("recipient"));
        }
        if record.token_address.is_zero() {
            return Err(MetadataError::MissingField("token_address"));
        }
        if record.tag.is_empty() {
            return Err(MetadataError::MissingField("tag"));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for HttpMetadataStore {
    async fn create_record(&self, record: &StreamRecord) -> Result<StreamRecord, MetadataError> {
        Self::validate(record)?;

        let response = self
            .http
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| MetadataError::WriteFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::WriteFailed(status.to_string()));
        }

        response
            .json()
            .await
            .map_err(|e| MetadataError::WriteFailed(e.to_string()))
    }
}
