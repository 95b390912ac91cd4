//! Request payload types for the RagEngine HTTP API
//!
//! These model the wire format RagEngine accepts. Responses are kept as
//! `serde_json::Value` because the service returns free-form JSON that the
//! CLI either prints verbatim or probes for well-known fields.

use serde::Serialize;
use serde_json::{Map, Value};

/// One chunk of a source document, as sent to the service.
///
/// `doc_id` and `hash_value` are only present in update payloads; index
/// creation lets the service assign its own IDs.
#[derive(Debug, Clone, Serialize)]
pub struct IngestDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,

    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_value: Option<String>,

    pub metadata: Map<String, Value>,
}

/// Body for `POST /rag/index`
#[derive(Debug, Clone, Serialize)]
pub struct CreateIndexRequest {
    pub index_name: String,
    pub documents: Vec<IngestDocument>,
}

/// Body for `POST /indexes/{index}/documents`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDocumentsRequest {
    pub documents: Vec<IngestDocument>,
}

/// Query parameters for `GET /indexes/{index}/documents`
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Maximum documents to return
    pub limit: u32,
    /// Pagination offset
    pub offset: u32,
    /// Maximum text length returned per document
    pub max_text_length: u32,
    /// Canonical JSON object string to filter by metadata
    pub metadata_filter: Option<String>,
}

impl ListQuery {
    /// Render as query-string pairs
    pub fn as_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("max_text_length", self.max_text_length.to_string()),
        ];
        if let Some(filter) = &self.metadata_filter {
            params.push(("metadata_filter", filter.clone()));
        }
        params
    }
}

/// A message in an OpenAI-compatible chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body for `POST /v1/chat/completions` with RagEngine's retrieval extension
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub index_name: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub context_token_ratio: f64,
}
