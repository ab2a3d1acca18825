//! HTTP chat-answer backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use reelroom_core::{ChatBackend, ChatTurnRequest, ChatTurnResponse, Error, Result};

/// Default request timeout in seconds. The collaborator call is the one
/// operation in the core that blocks for more than a single network round
/// trip, so it always carries an explicit timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Chat backend over a queueing-free request/response HTTP channel.
///
/// Posts the chat turn request to `{base_url}/chat` and expects
/// `{answer, citations[]}` back. Any transport failure, non-success
/// status, unusable payload, or timeout surfaces as `Error::Inference`;
/// the orchestrator maps all of these to the single user-facing
/// generation failure.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from environment: `CHAT_SERVICE_URL` (default
    /// `http://localhost:8090`) and `CHAT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("CHAT_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8090".to_string());
        let timeout_secs = std::env::var("CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs))
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn answer(&self, request: ChatTurnRequest) -> Result<ChatTurnResponse> {
        let start = Instant::now();
        debug!(
            subsystem = "inference",
            component = "http",
            op = "answer",
            tenant_id = %request.tenant_id,
            room_id = %request.room_id,
            history_len = request.history.len(),
            "Invoking chat collaborator"
        );

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Chat service returned {status}: {body}"
            )));
        }

        let result: ChatTurnResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {e}")))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            subsystem = "inference",
            component = "http",
            op = "answer",
            duration_ms = elapsed,
            citation_count = result.citations.len(),
            "Chat collaborator answered"
        );
        if elapsed > 10_000 {
            warn!(
                duration_ms = elapsed,
                history_len = request.history.len(),
                slow = true,
                "Slow chat collaborator call"
            );
        }
        Ok(result)
    }
}
