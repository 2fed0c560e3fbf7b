//! Docintake Server
//!
//! REST API for PDF document intake and structured analysis. For each
//! submitted document reference the server:
//!
//! - Fetches the PDF from the document store (S3)
//! - Determines whether the document is scanned or machine-readable
//! - Classifies machine-readable documents into one of six categories
//! - Requests a category-specific structured analysis from Bedrock
//! - Persists the completed analysis (best-effort) and returns it
//!
//! ## Architecture
//!
//! All external collaborators (Bedrock, S3) are constructed once here and
//! injected through `AppState` as trait objects; handlers and the pipeline
//! never touch global client state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod aws;
mod error;

use analysis_engine::TextAnalysisService;
use api::{handle_analyze, handle_health, handle_list_document_classes};
use aws::{BedrockAnalyzer, DocumentStore, ResultStore, S3DocumentStore, S3ResultStore};

/// Command-line arguments for the docintake server
#[derive(Parser, Debug)]
#[command(name = "docintake-server")]
#[command(about = "Document intake and analysis API server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bedrock model id for classification and analysis
    #[arg(long, default_value = aws::DEFAULT_MODEL_ID)]
    model_id: String,

    /// Text analysis call timeout in milliseconds
    #[arg(long, default_value = "60000")]
    timeout_ms: u64,

    /// Bucket for persisted analysis results (falls back to the
    /// RESULT_BUCKET environment variable; persistence is disabled when
    /// neither is set)
    #[arg(long)]
    result_bucket: Option<String>,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Text analysis collaborator (Bedrock in production, mocked in tests)
    pub service: Arc<dyn TextAnalysisService>,
    /// PDF byte source
    pub documents: Arc<dyn DocumentStore>,
    /// Best-effort persistence of completed analyses
    pub results: Option<Arc<dyn ResultStore>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting docintake server on {}:{}", args.host, args.port);

    // Construct AWS collaborators
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let result_bucket = args
        .result_bucket
        .or_else(|| std::env::var("RESULT_BUCKET").ok());
    let results: Option<Arc<dyn ResultStore>> = match &result_bucket {
        Some(bucket) => Some(Arc::new(S3ResultStore::new(&config, bucket))),
        None => {
            warn!("no result bucket configured; analysis results will not be persisted");
            None
        }
    };

    let state = AppState {
        service: Arc::new(BedrockAnalyzer::new(
            &config,
            &args.model_id,
            args.timeout_ms,
        )),
        documents: Arc::new(S3DocumentStore::new(&config)),
        results,
    };

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/document-classes", get(handle_list_document_classes))
        .route("/api/analyze", post(handle_analyze))
        // Apply middleware
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Model: {}", args.model_id);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Analysis timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
