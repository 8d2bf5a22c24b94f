//! formfill server
//!
//! A small HTTP facade around the `pdftk` binary. Provides REST endpoints
//! for:
//!
//! - Filling a named PDF template from a JSON payload
//! - Dumping a template's form fields (raw, pairs, or keys)
//! - Listing the templates discovered at startup
//!
//! All PDF semantics are delegated to the external toolkit through
//! `pdftk-engine`; this binary is routing, validation, and configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::get,
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdftk_engine::{FormToolkit, Pdftk, TemplateRegistry};

mod api;
mod error;

use api::{handle_dump_fields, handle_fill_template, handle_health, handle_list_templates};
use error::ServerError;

/// Command-line arguments for the formfill server
#[derive(Parser, Debug)]
#[command(name = "formfill-server")]
#[command(about = "HTTP facade around pdftk form filling")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Folder scanned for {name}.pdf templates at startup
    #[arg(long, default_value = "pdf")]
    templates_dir: PathBuf,

    /// pdftk executable to invoke
    #[arg(long, default_value = "pdftk")]
    pdftk_bin: PathBuf,

    /// Toolkit invocation timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
pub struct AppState {
    /// Template names discovered at startup; authoritative for the process lifetime.
    pub registry: TemplateRegistry,
    /// The external collaborator performing fill and dump operations.
    pub toolkit: Arc<dyn FormToolkit>,
}

impl AppState {
    /// The guard every `:name` route runs before any other work.
    pub fn resolve_template(&self, name: &str) -> Result<PathBuf, ServerError> {
        self.registry
            .resolve(name)
            .ok_or_else(|| ServerError::UnsupportedTemplate(name.to_string()))
    }
}

/// Build the application router; shared between `main` and the tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/pdf/", get(handle_list_templates))
        .route(
            "/pdf/:name",
            get(handle_dump_fields).post(handle_fill_template),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = TemplateRegistry::scan(&args.templates_dir);
    info!(
        "Discovered {} template(s) in {}",
        registry.len(),
        args.templates_dir.display()
    );

    let toolkit =
        Pdftk::new(&args.pdftk_bin).with_timeout(Duration::from_millis(args.timeout_ms));
    match toolkit.version().await {
        Ok(banner) => info!("Using {}", banner),
        Err(err) => warn!("pdftk probe failed ({}); fill and dump requests will error", err),
    }

    let state = Arc::new(AppState {
        registry,
        toolkit: Arc::new(toolkit),
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Toolkit timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
