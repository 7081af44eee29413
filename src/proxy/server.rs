//! Accept loop of the reference proxy.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::bridge::FreeBungeeChat;
use crate::common::error::Result;
use crate::config::ConfigStore;
use crate::host::AttributeCache;

use super::connection::handle_connection;
use super::registry::SessionRegistry;

/// The proxy: sessions, the attribute cache and the plugin wired together.
pub struct ProxyServer {
    plugin: FreeBungeeChat,
    sessions: Arc<SessionRegistry>,
    attributes: Arc<AttributeCache>,
}

impl ProxyServer {
    pub fn new(config: Arc<ConfigStore>) -> Self {
        let sessions = Arc::new(SessionRegistry::new(config.clone()));
        let attributes = Arc::new(AttributeCache::new());
        let plugin = FreeBungeeChat::new(
            config,
            sessions.clone(),
            attributes.clone(),
            sessions.clone(),
        );
        Self {
            plugin,
            sessions,
            attributes,
        }
    }

    pub fn plugin(&self) -> &FreeBungeeChat {
        &self.plugin
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn attributes(&self) -> &AttributeCache {
        &self.attributes
    }

    /// Accept connections until `shutdown` completes.
    pub async fn serve(
        self: Arc<Self>,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    debug!("Connection from {}", peer);
                    let server = Arc::clone(&self);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, server).await {
                            warn!("Connection from {} failed: {}", peer, e);
                        }
                    });
                }
                _ = &mut shutdown => {
                    info!("Shutting down, {} players online", self.sessions.len());
                    return Ok(());
                }
            }
        }
    }
}
