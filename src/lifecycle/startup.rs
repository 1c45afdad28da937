//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the served directory
//! - Connect to the overlay daemon and learn this node's addresses
//! - Bind listeners and begin accepting traffic
//! - Wait for a termination signal or a server failure
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Directory check happens before the daemon is contacted
//! - Listeners start last (traffic only when ready)

use std::sync::Arc;

use thiserror::Error;

use crate::config::validation::{validate_config, ValidationError};
use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::identity::{LocalClient, ResolveError};
use crate::lifecycle::{signals, Shutdown};
use crate::net::{bind_overlay, ListenerError};

/// Fatal conditions that stop the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    #[error("tailscaled client: {0}")]
    LocalClient(#[from] ResolveError),

    #[error("listener: {0}")]
    Listen(#[from] ListenerError),

    #[error("serve: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start serving and block until shutdown.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    validate_config(&config)?;

    let (client, status) = LocalClient::connect(&config.tailscale).await?;
    let listeners = bind_overlay(&status.tailscale_ips, config.listener.port).await?;

    let server = HttpServer::new(&config, Arc::new(client));
    let shutdown = Shutdown::new();

    tracing::info!(dir = ?config.dir, "Serving directory over tailnet");

    // The flag is sticky, so a signal that lands before the listeners
    // subscribe still stops them.
    let signal_shutdown = shutdown.clone();
    let signal_task = tokio::spawn(async move {
        signals::termination().await;
        signal_shutdown.trigger();
    });

    let served = server.run_all(listeners, &shutdown).await;
    signal_task.abort();
    served?;

    tracing::info!("Shutdown complete");
    Ok(())
}
