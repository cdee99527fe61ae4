//! Prompt Export API server.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, builds the Axum router, and serves it until a shutdown signal.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompt_export_api::config::{
    AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER, PORT_ENV_VAR,
};
use prompt_export_api::http::start_server;
use prompt_export_api::{create_router, AppState};

/// Prompt Export API: serves categorized prompt exports over HTTP
#[derive(Parser, Debug)]
#[command(name = "prompt-export-api", version, about)]
struct Args {
    /// Path to configuration file (defaults are used if the default path is missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "prompt_export_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen port (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the classifier's export file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(log_filter);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // An explicit --config must exist; the default path is optional
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    config.apply_port_env(std::env::var(PORT_ENV_VAR).ok())?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(export) = args.export {
        config.export.path = export;
    }
    config.validate()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        export = %config.export.path.display(),
        export_present = config.export.path.exists(),
        "Loaded configuration"
    );

    let state = AppState::new(&config);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
