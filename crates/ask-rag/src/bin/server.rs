//! Ask server binary
//!
//! Run with: cargo run -p ask-rag --bin ask-rag-server -- --config ask-rag.toml

use ask_rag::{config::RagConfig, server::RagServer};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Answer questions about an indexed document set over HTTP
#[derive(Debug, Parser)]
#[command(name = "ask-rag-server", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the vector index directory
    #[arg(long)]
    index: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ask_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(index) = args.index {
        config.index.path = index;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.openai.embedding_model);
    tracing::info!("  - Chat model: {} (temperature {})", config.openai.chat_model, config.openai.temperature);
    tracing::info!(
        "  - Index: {} ({} dims, {:?})",
        config.index.path.display(),
        config.index.dimensions,
        config.index.metric
    );
    tracing::info!("  - Context chunks: {}", config.pipeline.max_chunks);

    if !config.index.path.exists() {
        tracing::warn!(
            "Vector index not found at {}; /ask will fail until it is built",
            config.index.path.display()
        );
    }

    let server = RagServer::new(config)?;

    println!("\nServer starting...");
    println!("  Page:   http://{}/", server.address());
    println!("  Ask:    POST http://{}/ask", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
