//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ragingest - ingest text files into a RagEngine index and query it
#[derive(Parser, Debug)]
#[command(
    name = "ri",
    about = "Ingest .txt files into a RagEngine index and ask RAG questions",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the RagEngine service (falls back to $RAGENGINE_URL, then http://$INGRESS_IP)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// HTTP total timeout in seconds (default 60)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// HTTP connect timeout in seconds (default 10)
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Total HTTP attempts per request (default 3)
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an index and ingest a file's chunks (POST /rag/index)
    Create(IngestArgs),

    /// Update an index's chunks by deterministic doc_id (POST /indexes/{index}/documents)
    Update(IngestArgs),

    /// List documents in an index, paginated (GET /indexes/{index}/documents)
    List {
        /// Index name
        #[arg(short, long)]
        index: String,

        /// Max documents to return
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Pagination offset
        #[arg(short, long, default_value_t = 0)]
        offset: u32,

        /// Max text length returned per document
        #[arg(long, default_value_t = 1000)]
        max_text_length: u32,

        /// JSON object to filter by metadata, e.g. {"author":"kaito"}
        #[arg(long)]
        metadata_filter: Option<String>,
    },

    /// Ask a question against an index (POST /v1/chat/completions)
    #[command(alias = "query")]
    Chat(ChatArgs),
}

/// Shared flags for create and update
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Index name (e.g., rag_index)
    #[arg(short, long)]
    pub index: String,

    /// Path to the .txt file to ingest
    #[arg(short, long)]
    pub file: PathBuf,

    /// Max characters per chunk (default 3000)
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Overlap characters between chunks (default 200)
    #[arg(long)]
    pub overlap_chars: Option<usize>,

    /// Extra metadata as KEY=VALUE (repeatable); values are strings
    #[arg(short, long = "metadata", value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Extra metadata as a JSON object; wins over --metadata on collision
    #[arg(long)]
    pub metadata_json: Option<String>,
}

/// Flags for chat/query mode
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Index name
    #[arg(short, long)]
    pub index: String,

    /// User question/prompt
    #[arg(short, long)]
    pub question: Option<String>,

    /// Read the question from a text file (wins over --question)
    #[arg(long)]
    pub question_file: Option<PathBuf>,

    /// System message (default from config)
    #[arg(long)]
    pub system: Option<String>,

    /// Model identifier (falls back to $RAGENGINE_MODEL, then config)
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature (0.0 to 1.0)
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f64,

    /// Max tokens to generate
    #[arg(long, default_value_t = 2048)]
    pub max_tokens: u32,

    /// Fraction of context tokens reserved for retrieved documents
    #[arg(long, default_value_t = 0.5)]
    pub context_token_ratio: f64,

    /// Print the full JSON response instead of just the assistant text
    #[arg(long)]
    pub json: bool,

    /// Include source_nodes in the output when returned
    #[arg(long)]
    pub show_sources: bool,
}
