//! Blockly bridge: local server for the Blockly editor.
//! Run: cargo run -p blockly-bridge-gateway
//! Then open http://127.0.0.1:8000. Serves the editor from `blockly/`, exports generated code to
//! `src/main.cpp`, and keeps one saved workspace next to the editor assets.

mod handlers;
mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use blockly_bridge_core::{BridgeConfig, SourceExporter, WorkspaceStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serves the Blockly editor and writes exported code into the project."
)]
struct Cli {
    /// HTTP bind port (overrides config / BLOCKLY_PORT).
    #[arg(long)]
    port: Option<u16>,
    /// HTTP bind address.
    #[arg(long)]
    host: Option<String>,
    /// Project directory containing `blockly/` and `src/`.
    #[arg(long)]
    project_root: Option<PathBuf>,
    /// Editor asset directory, relative to the project root unless absolute.
    /// A relative `workspace_file` moves with it.
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Open the editor in the default browser once listening.
    #[arg(long)]
    open: bool,
}

impl Cli {
    fn apply(&self, mut config: BridgeConfig) -> BridgeConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(root) = &self.project_root {
            config.project_root = root.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.static_dir = dir.clone();
        }
        config
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: Arc<BridgeConfig>,
    pub workspace: Arc<WorkspaceStore>,
    pub exporter: Arc<SourceExporter>,
}

impl AppState {
    fn from_config(config: BridgeConfig) -> Self {
        Self {
            workspace: Arc::new(WorkspaceStore::new(config.workspace_path())),
            exporter: Arc::new(SourceExporter::new(config.export_path())),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("[blockly-bridge] .env not loaded: {} (using system environment)", e);
    }

    let config = cli.apply(BridgeConfig::load()?).with_absolute_root()?;
    let addr = config.bind_addr();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::error!("Port {} is already in use", config.port);
            tracing::error!(
                "Try another port: blockly-bridge --port {}",
                config.port.saturating_add(1)
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    let url = format!("http://localhost:{}", config.port);
    log_banner(&config, &url);

    if cli.open {
        if let Err(e) = webbrowser::open(&url) {
            tracing::warn!("Could not open browser: {}", e);
        }
    }

    let app = build_app(AppState::from_config(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn log_banner(config: &BridgeConfig, url: &str) {
    let static_root = config.static_root();
    tracing::info!("Blockly bridge started");
    tracing::info!("Open {} in your browser", url);
    tracing::info!("Serving files from: {}", static_root.display());
    tracing::info!("Project root: {}", config.project_root.display());
    tracing::info!("Export target: {}", config.export_path().display());
    tracing::info!("Workspace file: {}", config.workspace_path().display());
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /api/code            - Get code generation info");
    tracing::info!("  POST /api/code            - Generate code from Blockly XML");
    tracing::info!("  POST /api/export          - Export code to the export target");
    tracing::info!("  POST /api/workspace/save  - Save Blockly workspace");
    tracing::info!("  GET  /api/workspace/load  - Load saved Blockly workspace");
    if !static_root.is_dir() {
        tracing::warn!(
            "Static directory {} does not exist; every asset request will 404",
            static_root.display()
        );
    }
    tracing::info!("Press Ctrl+C to stop");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl+C handler failed: {}", e);
        std::future::pending::<()>().await;
    }
}

fn build_app(state: AppState) -> Router {
    // Anything that is not an API route is a static asset; ServeDir rejects `..` traversal.
    let static_files = ServeDir::new(state.config.static_root())
        .append_index_html_on_directories(true)
        .call_fallback_on_method_not_allowed(true)
        .fallback(handlers::not_found.into_service());
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route(
            "/api/code",
            get(handlers::code::code_info)
                .head(handlers::not_found)
                .post(handlers::code::generate_code)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/export",
            post(handlers::export::export_code).fallback(handlers::not_found),
        )
        .route(
            "/api/workspace/save",
            post(handlers::workspace::save_workspace).fallback(handlers::not_found),
        )
        .route(
            "/api/workspace/load",
            get(handlers::workspace::load_workspace)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .with_state(state)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::preflight))
        .layer(axum::middleware::from_fn(middleware::dev_headers))
        .layer(axum::middleware::from_fn(middleware::access_log))
}
