use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faqbot_core::{
    load_config, load_config_from_env, validate_config, Config, HuggingFaceQaClient, QaClient,
};
use faqbot_server::api::create_router;
use faqbot_server::state::AppState;

/// Environment variable naming the config file.
const CONFIG_ENV_VAR: &str = "FAQBOT_CONFIG";

/// Config file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "faqbot.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Pick up HF_TOKEN and FAQBOT_* from a local .env, if any
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let config = load()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Remote model: {}", config.remote.model);
    info!("FAQ entries: {}", config.faq.len());
    if config.remote.token().is_some() {
        info!("Inference API token configured");
    } else {
        warn!("No inference API token configured; unmatched messages will get the fallback answer");
    }

    // Create remote QA client
    let hf_client =
        HuggingFaceQaClient::new(&config.remote).context("Failed to create remote QA client")?;
    info!(
        "Using {} QA client at {}",
        hf_client.provider(),
        hf_client.endpoint()
    );
    let qa_client: Arc<dyn QaClient> = Arc::new(hf_client);

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), qa_client));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Load configuration.
///
/// An explicit `FAQBOT_CONFIG` must point at an existing file. Without it,
/// `faqbot.toml` is used if present, else defaults plus environment.
fn load() -> Result<Config> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            let config_path = PathBuf::from(path);
            info!("Loading configuration from {:?}", config_path);
            load_config(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))
        }
        Err(_) => {
            let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if config_path.exists() {
                info!("Loading configuration from {:?}", config_path);
                load_config(&config_path)
                    .with_context(|| format!("Failed to load config from {:?}", config_path))
            } else {
                info!("No config file found, using defaults and environment");
                load_config_from_env().context("Failed to load config from environment")
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
