//! Building ingestible chunks from a source file
//!
//! Chunk IDs are UUIDv5 over the URL namespace of
//! `file://{absolute_path}#chunk={index}`: no randomness, no content
//! dependence, so re-ingesting the same path in update mode overwrites the
//! same remote records instead of inserting duplicates.

use std::path::Path;

use chrono::Utc;
use eyre::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::chunker::{self, ChunkOptions};

/// One chunk ready to be sent to the service
#[derive(Debug, Clone)]
pub struct DocumentChunk {
    /// Deterministic identifier, keyed by (absolute path, chunk index)
    pub doc_id: String,
    /// Chunk text, overlap included
    pub text: String,
    /// Base metadata merged with user metadata plus chunk bookkeeping
    pub metadata: Map<String, Value>,
}

/// Deterministic chunk identifier for (absolute file path, chunk index).
///
/// Pure: identical inputs give the identical UUID across runs and machines.
pub fn doc_id(file_abs: &Path, chunk_index: usize) -> String {
    let name = format!("file://{}#chunk={}", file_abs.display(), chunk_index);
    Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string()
}

/// Lowercase hex SHA-256 of the chunk text, sent as `hash_value` in updates
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Read a file, chunk it, and attach metadata to every chunk.
///
/// Base fields (`source_type`, `filename`, `path`, `ingested_at`) can be
/// overridden by `extra_metadata`; `chunk_index` and `chunk_count` are set
/// last and always win.
pub fn build_chunks(
    path: &Path,
    options: &ChunkOptions,
    extra_metadata: &Map<String, Value>,
) -> Result<Vec<DocumentChunk>> {
    let file_abs = std::path::absolute(path).context(format!("Failed to resolve path: {}", path.display()))?;
    let text = std::fs::read_to_string(path).context(format!("Failed to read file: {}", path.display()))?;

    let chunks = chunker::chunk_text(&text, options);
    let chunk_count = chunks.len();
    debug!(path = %file_abs.display(), chunk_count, "chunked document");

    let mut base = Map::new();
    base.insert("source_type".to_string(), Value::from("txt"));
    base.insert(
        "filename".to_string(),
        Value::from(file_abs.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()),
    );
    base.insert("path".to_string(), Value::from(file_abs.display().to_string()));
    base.insert("ingested_at".to_string(), Value::from(Utc::now().to_rfc3339()));
    for (key, value) in extra_metadata {
        base.insert(key.clone(), value.clone());
    }

    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let mut metadata = base.clone();
            metadata.insert("chunk_index".to_string(), Value::from(index));
            metadata.insert("chunk_count".to_string(), Value::from(chunk_count));
            DocumentChunk {
                doc_id: doc_id(&file_abs, index),
                text,
                metadata,
            }
        })
        .collect())
}
