//! # Monitor Configuration

use std::fs;

use serde::{Deserialize, Serialize};

use paystream_core::{StreamId, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_TOKEN_DECIMALS};

use crate::errors::{MonitorError, MonitorResult};

/// Monitor configuration loaded from a TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Base URL of the ledger JSON gateway
    pub ledger_url: String,

    /// Base URL of the off-chain metadata store, if any
    pub metadata_url: Option<String>,

    /// Reconciliation poll cadence in seconds
    pub poll_interval_secs: u64,

    /// Projection refresh cadence in seconds
    pub refresh_interval_secs: u64,

    /// Per-request ledger timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Display decimals of the streamed token
    pub token_decimals: u32,

    /// Streams to watch
    pub streams: Vec<StreamEntry>,
}

/// Configuration for an individual watched stream
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamEntry {
    /// Label for logging
    pub name: String,

    /// Stream handle on the ledger
    pub stream_id: StreamId,

    /// Whether this stream is watched
    pub enabled: bool,
}

impl MonitorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> MonitorResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| MonitorError::config(&format!("failed to read {}: {}", path, e)))?;

        let config: MonitorConfig = toml::from_str(&content)
            .map_err(|e| MonitorError::config(&format!("failed to parse {}: {}", path, e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> MonitorResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MonitorError::config(&format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| MonitorError::config(&format!("failed to write {}: {}", path, e)))?;
        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> MonitorResult<()> {
        if self.ledger_url.is_empty() {
            return Err(MonitorError::invalid_parameter(
                "ledger_url",
                "empty",
                "non-empty URL",
            ));
        }

        if self.poll_interval_secs == 0 {
            return Err(MonitorError::invalid_parameter(
                "poll_interval_secs",
                "0",
                "greater than 0",
            ));
        }

        if self.refresh_interval_secs == 0 {
            return Err(MonitorError::invalid_parameter(
                "refresh_interval_secs",
                "0",
                "greater than 0",
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(MonitorError::invalid_parameter(
                "request_timeout_ms",
                "0",
                "greater than 0",
            ));
        }

        for stream in &self.streams {
            stream.validate()?;
        }

        Ok(())
    }

    /// Streams to actually watch
    pub fn enabled_streams(&self) -> Vec<&StreamEntry> {
        self.streams.iter().filter(|s| s.enabled).collect()
    }
}

impl StreamEntry {
    fn validate(&self) -> MonitorResult<()> {
        if self.name.is_empty() {
            return Err(MonitorError::invalid_parameter(
                "stream name",
                "empty",
                "non-empty string",
            ));
        }
        if self.stream_id.is_zero() {
            return Err(MonitorError::invalid_parameter(
                "stream_id",
                "zero",
                "a real stream handle",
            ));
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ledger_url: "http://localhost:8080/paystream".to_string(),
            metadata_url: None,
            poll_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_ms: 5_000,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            streams: vec![],
        }
    }
}

/// Create an example configuration file
pub fn create_example_config(path: &str) -> MonitorResult<()> {
    let example_config = MonitorConfig {
        ledger_url: "http://localhost:8080/paystream".to_string(),
        metadata_url: Some("http://localhost:3000/api/streams/new".to_string()),
        streams: vec![
            StreamEntry {
                name: "salary".to_string(),
                stream_id: StreamId::new([1; StreamId::LEN]),
                enabled: true,
            },
            StreamEntry {
                name: "grant".to_string(),
                stream_id: StreamId::new([2; StreamId::LEN]),
                enabled: false,
            },
        ],
        ..Default::default()
    };

    example_config.save(path)?;
    Ok(())
}
