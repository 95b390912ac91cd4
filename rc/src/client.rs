//! RagEngine HTTP client with bounded retries
//!
//! One `RagClient` per CLI invocation. Every operation funnels through a
//! single retry loop: transient failures are retried with exponential
//! backoff, 4xx rejections surface immediately, and the last observed error
//! is returned once the attempt budget is spent.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::types::{ChatRequest, CreateIndexRequest, ListQuery, UpdateDocumentsRequest};

/// Default total timeout per request
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default connect timeout per request
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default attempt budget (total attempts, not retries-after-first)
pub const DEFAULT_RETRIES: u32 = 3;

/// Initial backoff before the second attempt
const INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

/// Timeouts and retry budget for a client
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Total timeout for each request
    pub timeout: Duration,
    /// Connect timeout for each request
    pub connect_timeout: Duration,
    /// Total attempts per operation (1 = no retry)
    pub retries: u32,
    /// Backoff before the second attempt; doubles per retry
    pub backoff: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            backoff: INITIAL_BACKOFF,
        }
    }
}

/// RagEngine API client
pub struct RagClient {
    base_url: String,
    http: Client,
    retries: u32,
    backoff: Duration,
}

impl RagClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>, options: HttpOptions) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            base_url,
            http,
            retries: options.retries.max(1),
            backoff: options.backoff,
        })
    }

    /// Create an index and ingest its initial documents
    pub async fn create_index(&self, request: &CreateIndexRequest) -> Result<Value, ClientError> {
        let url = format!("{}/rag/index", self.base_url);
        debug!(%url, documents = request.documents.len(), "create_index");
        self.send(self.http.post(&url).json(request)).await
    }

    /// Upsert documents in an existing index by doc_id
    pub async fn update_documents(&self, index: &str, request: &UpdateDocumentsRequest) -> Result<Value, ClientError> {
        let url = format!("{}/indexes/{}/documents", self.base_url, index);
        debug!(%url, documents = request.documents.len(), "update_documents");
        self.send(self.http.post(&url).json(request)).await
    }

    /// List documents in an index, paginated
    pub async fn list_documents(&self, index: &str, query: &ListQuery) -> Result<Value, ClientError> {
        let url = format!("{}/indexes/{}/documents", self.base_url, index);
        debug!(%url, limit = query.limit, offset = query.offset, "list_documents");
        self.send(self.http.get(&url).query(&query.as_params())).await
    }

    /// Ask a question against an index via the OpenAI-compatible endpoint
    pub async fn chat(&self, request: &ChatRequest) -> Result<Value, ClientError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(%url, model = %request.model, index = %request.index_name, "chat");
        self.send(self.http.post(&url).json(request)).await
    }

    /// Send a request, retrying transient failures up to the attempt budget
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let mut last_error: Option<ClientError> = None;

        for attempt in 1..=self.retries {
            if attempt > 1 {
                let backoff = self.backoff * 2u32.pow(attempt - 2);
                warn!(
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "retrying after transient error"
                );
                tokio::time::sleep(backoff).await;
            }

            let req = request
                .try_clone()
                .ok_or_else(|| ClientError::InvalidRequest("request body is not cloneable".to_string()))?;

            match self.attempt(req).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    debug!(attempt, error = %e, "transient error");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::InvalidRequest("retry budget exhausted".to_string())))
    }

    async fn attempt(&self, request: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ClientError::Network)?;

        if status >= 400 {
            return Err(ClientError::Api { status, message: body });
        }

        // The service normally replies with JSON; wrap anything else so the
        // caller still sees the body.
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) => Ok(serde_json::json!({ "raw": body })),
        }
    }
}
