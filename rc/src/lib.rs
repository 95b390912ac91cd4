//! RagClient - HTTP client for the RagEngine index/query service
//!
//! Wraps the four remote operations exposed by a RagEngine deployment:
//!
//! - create an index and ingest initial chunks: `POST {base}/rag/index`
//! - upsert chunks by deterministic ID: `POST {base}/indexes/{index}/documents`
//! - list ingested documents (paginated): `GET {base}/indexes/{index}/documents`
//! - OpenAI-compatible RAG chat: `POST {base}/v1/chat/completions`
//!
//! All operations share one bounded retry policy: transient failures
//! (network errors, timeouts, 408/429, 5xx) are retried with exponential
//! backoff until the attempt budget is spent; 4xx rejections surface
//! immediately.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HttpOptions, RagClient};
pub use error::ClientError;
pub use types::{ChatMessage, ChatRequest, CreateIndexRequest, IngestDocument, ListQuery, UpdateDocumentsRequest};
