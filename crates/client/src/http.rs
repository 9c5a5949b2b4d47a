//! # HTTP Ledger Gateway
//!
//! `StreamLedger` implementation over a JSON HTTP gateway: one POST per
//! operation, serde bodies, no retry. Operation routes carry the ledger's
//! own method names so a gateway can forward them without translation.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use paystream_core::{Address, HookConfig, StreamId, StreamParameters};

use crate::config::ClientConfig;
use crate::ledger::{Claimable, LedgerError, LedgerResult, StreamLedger};

/// Ledger gateway client
pub struct HttpLedger {
    http: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpLedger {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.ledger_url.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    /// Issue one call. Transport failures and non-success statuses map to
    /// discrete `LedgerError` variants; the caller decides whether that
    /// means skip-and-retry-next-tick (polling) or a surfaced failure
    /// (user-initiated operations).
    async fn call<B, R>(&self, method: &str, body: &B) -> LedgerResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, method);
        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LedgerError::Timeout(self.timeout_ms)
                } else {
                    LedgerError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected(format!("{}: {}", status, reason)));
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))
    }
}

// Request/response bodies

#[derive(Serialize)]
struct StreamIdArg {
    id: StreamId,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    params: &'a StreamParameters,
    hooks: &'a HookConfig,
    tag: &'a str,
}

#[derive(Serialize)]
struct UpdateArgs {
    id: StreamId,
    amount: u64,
    starting_timestamp: u64,
    duration: u64,
    recurring: bool,
}

#[derive(Serialize)]
struct VaultArgs {
    id: StreamId,
    vault: Address,
}

#[derive(Serialize)]
struct HookArgs<'a> {
    id: StreamId,
    config: &'a HookConfig,
}

#[derive(Serialize)]
struct ApproveArgs {
    spender: Address,
    amount: u64,
}

#[derive(Serialize)]
struct PartyArg {
    address: Address,
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: StreamId,
}

#[derive(Deserialize)]
struct Ack {}

#[async_trait]
impl StreamLedger for HttpLedger {
    async fn read_stream(&self, id: StreamId) -> LedgerResult<StreamParameters> {
        self.call("getStreamData", &StreamIdArg { id }).await
    }

    async fn read_claimable(&self, id: StreamId) -> LedgerResult<Claimable> {
        self.call("getAmountToCollectFromStreamAndFeeToPay", &StreamIdArg { id })
            .await
    }

    async fn create_stream(
        &self,
        params: &StreamParameters,
        hooks: &HookConfig,
        tag: &str,
    ) -> LedgerResult<StreamId> {
        let response: CreatedResponse =
            self.call("setStream", &CreateArgs { params, hooks, tag }).await?;
        Ok(response.id)
    }

    async fn update_stream(
        &self,
        id: StreamId,
        amount: u64,
        starting_timestamp: u64,
        duration: u64,
        recurring: bool,
    ) -> LedgerResult<()> {
        let _: Ack = self
            .call(
                "updateStream",
                &UpdateArgs { id, amount, starting_timestamp, duration, recurring },
            )
            .await?;
        Ok(())
    }

    async fn cancel_stream(&self, id: StreamId) -> LedgerResult<()> {
        let _: Ack = self.call("cancelStream", &StreamIdArg { id }).await?;
        Ok(())
    }

    async fn collect_funds(&self, id: StreamId) -> LedgerResult<()> {
        let _: Ack = self.call("collectFundsFromStream", &StreamIdArg { id }).await?;
        Ok(())
    }

    async fn pause_stream(&self, id: StreamId) -> LedgerResult<()> {
        let _: Ack = self.call("pauseStream", &StreamIdArg { id }).await?;
        Ok(())
    }

    async fn resume_stream(&self, id: StreamId) -> LedgerResult<()> {
        let _: Ack = self.call("resumeStream", &StreamIdArg { id }).await?;
        Ok(())
    }

    async fn set_vault(&self, id: StreamId, vault: Address) -> LedgerResult<()> {
        let _: Ack = self.call("setVaultForStream", &VaultArgs { id, vault }).await?;
        Ok(())
    }

    async fn set_hook_config(&self, id: StreamId, config: &HookConfig) -> LedgerResult<()> {
        let _: Ack = self.call("setHookConfigForStream", &HookArgs { id, config }).await?;
        Ok(())
    }

    async fn approve(&self, spender: Address, amount: u64) -> LedgerResult<()> {
        let _: Ack = self.call("approve", &ApproveArgs { spender, amount }).await?;
        Ok(())
    }

    async fn stream_ids_for_recipient(&self, recipient: Address) -> LedgerResult<Vec<StreamId>> {
        self.call("getRecipientStreamHashes", &PartyArg { address: recipient })
            .await
    }

    async fn stream_ids_for_streamer(&self, streamer: Address) -> LedgerResult<Vec<StreamId>> {
        self.call("getStreamerStreamHashes", &PartyArg { address: streamer })
            .await
    }
}
