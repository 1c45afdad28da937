//! Read-only file server for the tailnet.
//!
//! Serves one local directory on this node's overlay addresses. Every request
//! is attributed to the user and node behind the connection, logged, and
//! handed to a static file service; binary media get a one-year cache policy.

pub mod cache_policy;
pub mod config;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use identity::{CallerIdentity, IdentityResolver, LocalClient, ResolveError};
pub use lifecycle::Shutdown;
