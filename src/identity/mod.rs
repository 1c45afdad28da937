//! Caller identity resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound connection (remote ip:port)
//!     → IdentityResolver::whois
//!     → local_api.rs (HTTP over tailscaled's Unix socket)
//!     → CallerIdentity (login name, node name)
//! ```
//!
//! # Design Decisions
//! - One lookup per request, never cached
//! - The lookup future is owned by the request; dropping it abandons the call
//! - Trait seam so the dispatcher can run against a fake resolver

pub mod local_api;
pub mod types;

use std::net::SocketAddr;

use async_trait::async_trait;

pub use local_api::{LocalClient, OverlayStatus};
pub use types::{first_label, CallerIdentity, ResolveError};

/// Maps a connection's remote address to the identity behind it.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn whois(&self, remote_addr: SocketAddr) -> Result<CallerIdentity, ResolveError>;
}
