//! Prompt enrichment service
//!
//! HTTP server that enriches prompts with retrieved context and answers
//! them from two sources at once: a vector similarity index and a
//! relational keyword store.

mod routes;

use clap::Parser;
use enrich_core::{config::AppConfig, logging, AppError, AppResult};
use enrich_pipeline::EnrichmentPipeline;
use enrich_relational::{ensure_schema, seed_sample_rows, PgSearchStore, RelationalSearch};
use enrich_vector::{create_embedder, seed_collection, Embedder, QdrantClient, VectorIndex};
use routes::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Prompt enrichment service - dual-source retrieval behind one endpoint
#[derive(Parser, Debug)]
#[command(name = "enrichd")]
#[command(about = "Prompt enrichment service with dual-source retrieval", long_about = None)]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Path to config file
    #[arg(short, long, env = "ENRICH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Skip schema and collection provisioning at startup
    #[arg(long)]
    skip_provision: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration: defaults, then file, then environment
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.log_level.is_some() {
        config.logging.level = cli.log_level.clone();
    }
    if cli.no_color {
        config.logging.no_color = true;
    }

    // Initialize logging with final configuration
    logging::init_logging(config.logging.level.as_deref(), config.logging.no_color)?;

    tracing::info!("Prompt enrichment service starting");
    tracing::debug!("Vector store: {}", config.vector.url);
    tracing::debug!("Collection: {}", config.vector.collection);

    // Wire up the retrieval sources
    let embedder = create_embedder(&config.vector.embedder, config.vector.dimensions)?;
    let mut qdrant = QdrantClient::new(
        &config.vector.url,
        &config.vector.collection,
        config.vector.dimensions,
        embedder.clone(),
    )?
    .with_timeout(Duration::from_secs(config.vector.timeout_secs))?;
    if let Some(api_key) = &config.vector.api_key {
        qdrant = qdrant.with_api_key(api_key);
    }
    let vector: Arc<dyn VectorIndex> = Arc::new(qdrant);

    let store = Arc::new(PgSearchStore::connect(&config.database)?);
    let relational: Arc<dyn RelationalSearch> = store.clone();

    // Availability-first startup: provisioning failures are logged, the
    // server still serves and health reports the broken store
    if cli.skip_provision {
        tracing::info!("Skipping provisioning (--skip-provision)");
    } else {
        provision(vector.as_ref(), &store, embedder.as_ref()).await;
    }

    let pipeline = Arc::new(EnrichmentPipeline::new(vector.clone(), relational.clone())?);
    let state = AppState {
        pipeline,
        vector,
        relational,
    };

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain pool connections before exit
    store.close().await;
    tracing::info!("Shut down cleanly");
    Ok(())
}

/// Bootstrap both stores with schema and sample data.
async fn provision(vector: &dyn VectorIndex, store: &PgSearchStore, embedder: &dyn Embedder) {
    match ensure_schema(store).await {
        Ok(()) => match seed_sample_rows(store).await {
            Ok(0) => {}
            Ok(inserted) => tracing::info!("Inserted {} sample rows", inserted),
            Err(e) => tracing::warn!("Sample row seeding failed: {}", e),
        },
        Err(e) => tracing::warn!("Database provisioning failed, continuing without it: {}", e),
    }

    match vector.ensure_collection().await {
        Ok(true) => {
            if let Err(e) = seed_collection(vector, embedder).await {
                tracing::warn!("Collection seeding failed: {}", e);
            }
        }
        Ok(false) => {}
        Err(e) => tracing::warn!("Vector provisioning failed, continuing without it: {}", e),
    }
}

async fn shutdown_signal() {
    handle_ctrl_c(tokio::signal::ctrl_c().await).await;
}

/// Completes only when a shutdown signal actually arrived; a failed
/// handler registration logs the error and never completes, leaving the
/// server running until killed.
async fn handle_ctrl_c(listen: std::io::Result<()>) {
    match listen {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
