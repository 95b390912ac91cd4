//! ragingest - ingest local text files into a RagEngine index over HTTP
//!
//! Splits a document into overlapping, retrieval-friendly chunks, derives a
//! deterministic ID per chunk from (absolute path, chunk index) so repeated
//! update runs overwrite the same remote records, attaches merged metadata,
//! and sends everything to a RagEngine service via [`ragclient`].
//!
//! # Example
//!
//! ```text
//! export INGRESS_IP=1.2.3.4
//! ri create --file ./cra-tax-rules.txt --index rag_index
//! ri update --file ./cra-tax-rules.txt --index rag_index
//! ri list --index rag_index --limit 5
//! ri chat --index rag_index --question "What benefits are income-tested?" --show-sources
//! ```

pub mod chunker;
pub mod cli;
pub mod config;
pub mod document;
pub mod metadata;
pub mod output;
