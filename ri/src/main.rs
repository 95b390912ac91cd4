//! ri - RagEngine document ingestion CLI
//!
//! Entry point wiring the chunker, metadata merge, and HTTP client together.
//! Configuration and JSON flags are validated before any network call; every
//! failure exits non-zero with a message on stderr.

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, bail, eyre};
use serde_json::Value;
use tracing::{debug, info};

use ragclient::{
    ChatMessage, ChatRequest, CreateIndexRequest, HttpOptions, IngestDocument, ListQuery, RagClient,
    UpdateDocumentsRequest,
};
use ragingest::chunker::ChunkOptions;
use ragingest::cli::{ChatArgs, Cli, Command, IngestArgs};
use ragingest::config::{self, Config};
use ragingest::{document, metadata, output};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match &cli.command {
        Command::Create(args) => cmd_ingest(&cli, &config, args, IngestMode::Create).await,
        Command::Update(args) => cmd_ingest(&cli, &config, args, IngestMode::Update).await,
        Command::List {
            index,
            limit,
            offset,
            max_text_length,
            metadata_filter,
        } => cmd_list(&cli, &config, index, *limit, *offset, *max_text_length, metadata_filter.as_deref()).await,
        Command::Chat(args) => cmd_chat(&cli, &config, args).await,
    }
}

enum IngestMode {
    Create,
    Update,
}

fn http_options(cli: &Cli, config: &Config) -> HttpOptions {
    HttpOptions {
        timeout: Duration::from_secs(cli.timeout.unwrap_or(config.timeout_secs)),
        connect_timeout: Duration::from_secs(cli.connect_timeout.unwrap_or(config.connect_timeout_secs)),
        retries: cli.retries.unwrap_or(config.retries),
        ..Default::default()
    }
}

/// Resolve the base URL and build the client; fails before any network call
/// when no source yields a URL
fn build_client(cli: &Cli, config: &Config) -> Result<RagClient> {
    let base_url = config::resolve_base_url(cli.base_url.as_deref(), config).ok_or_else(|| {
        eyre!(
            "Missing base URL. Provide --base-url or set ${} or ${}.",
            config::BASE_URL_ENV,
            config::INGRESS_IP_ENV
        )
    })?;
    debug!(%base_url, "resolved base URL");

    RagClient::new(base_url, http_options(cli, config)).context("Failed to create HTTP client")
}

/// Chunk the file and send it as a create or update request
async fn cmd_ingest(cli: &Cli, config: &Config, args: &IngestArgs, mode: IngestMode) -> Result<()> {
    if !args.file.is_file() {
        bail!("File not found: {}", args.file.display());
    }

    // Parse metadata flags before touching the network.
    let mut extra = metadata::merge(&args.metadata, args.metadata_json.as_deref())?;
    extra.insert("index_name".to_string(), Value::from(args.index.clone()));

    let options = ChunkOptions {
        max_chars: args.max_chars.unwrap_or(config.max_chars),
        overlap_chars: args.overlap_chars.unwrap_or(config.overlap_chars),
    };

    let chunks = document::build_chunks(&args.file, &options, &extra)?;
    if chunks.is_empty() {
        bail!("No ingestible text in {}", args.file.display());
    }
    let count = chunks.len();
    info!(count, index = %args.index, "built document chunks");

    let client = build_client(cli, config)?;

    let result = match mode {
        IngestMode::Create => {
            let request = CreateIndexRequest {
                index_name: args.index.clone(),
                documents: chunks
                    .into_iter()
                    .map(|chunk| IngestDocument {
                        doc_id: None,
                        hash_value: None,
                        text: chunk.text,
                        metadata: chunk.metadata,
                    })
                    .collect(),
            };
            client.create_index(&request).await?
        }
        IngestMode::Update => {
            let request = UpdateDocumentsRequest {
                documents: chunks
                    .into_iter()
                    .map(|chunk| IngestDocument {
                        doc_id: Some(chunk.doc_id),
                        hash_value: Some(document::content_hash(&chunk.text)),
                        text: chunk.text,
                        metadata: chunk.metadata,
                    })
                    .collect(),
            };
            client.update_documents(&args.index, &request).await?
        }
    };

    eprintln!("{} {} chunks -> index {}", "✓".green(), count, args.index.cyan());
    output::print_json(&result)
}

/// List documents in an index, paginated
async fn cmd_list(
    cli: &Cli,
    config: &Config,
    index: &str,
    limit: u32,
    offset: u32,
    max_text_length: u32,
    metadata_filter: Option<&str>,
) -> Result<()> {
    // Validate the filter before touching the network.
    let filter = metadata_filter.map(metadata::canonical_filter).transpose()?;

    let client = build_client(cli, config)?;
    let query = ListQuery {
        limit,
        offset,
        max_text_length,
        metadata_filter: filter,
    };

    let result = client.list_documents(index, &query).await?;
    output::print_json(&result)
}

/// Ask a question against an index
async fn cmd_chat(cli: &Cli, config: &Config, args: &ChatArgs) -> Result<()> {
    let question = match &args.question_file {
        Some(path) => std::fs::read_to_string(path)
            .context(format!("Failed to read --question-file {}", path.display()))?
            .trim()
            .to_string(),
        None => args.question.clone().unwrap_or_default(),
    };
    if question.is_empty() {
        bail!("Chat mode requires --question or --question-file.");
    }

    let model = config::resolve_model(args.model.as_deref(), config);
    let system = args.system.clone().unwrap_or_else(|| config.system.clone());

    let client = build_client(cli, config)?;
    let request = ChatRequest {
        index_name: args.index.clone(),
        model,
        messages: vec![ChatMessage::system(system), ChatMessage::user(question)],
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        context_token_ratio: args.context_token_ratio,
    };

    info!(index = %args.index, model = %request.model, "sending chat request");
    let result = client.chat(&request).await?;

    output::print_chat(&result, args.json, args.show_sources)
}
