//! FreeBungeeChat - reference proxy hosting the chat relay
//!
//! Players connect over a line-based TCP protocol; chat is relayed across
//! their backend servers according to the plugin configuration.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use freebungeechat::config::env::get_config_path;
use freebungeechat::config::ConfigStore;
use freebungeechat::proxy::ProxyServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("FreeBungeeChat v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let store = ConfigStore::open(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} is properly formatted.", config_path);
        e
    })?;

    let settings = store.snapshot();
    info!("Configuration loaded successfully");
    info!("  Global chat: {}", settings.config.always_global_chat);
    info!("  Ignore command: {}", settings.config.enable_ignore_command);
    info!("  Excluded servers: {:?}", settings.config.exclude_servers);
    info!("  Regex rules: {}", settings.rules.len());

    let listener = TcpListener::bind(&settings.config.host.listen)
        .await
        .map_err(|e| {
            error!("Failed to bind {}: {}", settings.config.host.listen, e);
            e
        })?;

    let server = Arc::new(ProxyServer::new(Arc::new(store)));
    server.serve(listener, shutdown_signal()).await?;

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
