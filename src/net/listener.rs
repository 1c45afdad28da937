//! TCP listeners on the node's overlay addresses.
//!
//! # Responsibilities
//! - Bind the configured port on every overlay address
//! - Report which address failed to bind

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The daemon reported no overlay addresses for this node.
    #[error("no overlay addresses assigned to this node")]
    NoAddresses,

    /// Failed to bind to address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind `port` on each overlay address. All or nothing.
pub async fn bind_overlay(addresses: &[IpAddr], port: u16) -> Result<Vec<TcpListener>, ListenerError> {
    if addresses.is_empty() {
        return Err(ListenerError::NoAddresses);
    }

    let mut listeners = Vec::with_capacity(addresses.len());
    for ip in addresses {
        let addr = SocketAddr::new(*ip, port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind { addr, source })?;

        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        tracing::info!(address = %local_addr, "Listener bound");
        listeners.push(listener);
    }

    Ok(listeners)
}
