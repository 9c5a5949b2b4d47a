//! # Client Configuration

use serde::{Deserialize, Serialize};

use paystream_core::DEFAULT_TOKEN_DECIMALS;

/// Configuration for the ledger gateway and metadata store clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the ledger JSON gateway
    pub ledger_url: String,

    /// Base URL of the off-chain metadata store; None disables record keeping
    pub metadata_url: Option<String>,

    /// Display decimals of the streamed token
    pub token_decimals: u32,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ledger_url: "http://localhost:8080/paystream".to_string(),
            metadata_url: None,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            request_timeout_ms: 5_000,
        }
    }
}
