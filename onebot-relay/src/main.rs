//! OneBot Relay - ingress server hosting the webhook relay.
//!
//! Message records posted to `/events` are offered to every registered
//! receiver; the relay forwards each one to the configured webhook.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{net::TcpListener, runtime::Handle, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use onebot_relay::{
    web, AppState, Config, ConfigStore, ConfigurableUi, FileStore, FunctionHook, Interceptor,
    MemoryStore, OneBotHttpApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_starting");

    let config = Config::from_env();
    info!(
        port = config.port,
        settings_file = ?config.config_path,
        onebot_url_set = config.onebot_url.is_some(),
        auth_configured = config.auth_token.is_some(),
        "config_loaded"
    );

    let store: Arc<dyn ConfigStore> = match &config.config_path {
        Some(path) => Arc::new(FileStore::open(path).context("Failed to open settings file")?),
        None => Arc::new(MemoryStore::new()),
    };

    let client = Client::builder()
        .build()
        .context("Failed to create HTTP client")?;

    let interceptor = Arc::new(Interceptor::new());
    let relay = OneBotHttpApi::new(client, store, interceptor.clone(), Handle::current());

    if let Some(url) = &config.onebot_url {
        let seeded = relay
            .seed_destination(url)
            .context("Failed to store ONEBOT_URL")?;
        info!(seeded = seeded, "relay_destination_seed");
    }

    if !relay.init_once() {
        anyhow::bail!("{} failed to initialize", relay.name());
    }
    info!(
        hook = relay.name(),
        enabled = !relay.current_value().is_empty(),
        "relay_hook_ready"
    );

    let state = AppState::new(interceptor, relay, config.auth_token.clone());
    let app = web::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
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
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}
