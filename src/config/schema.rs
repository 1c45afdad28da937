//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the tailscaled LocalAPI socket on Linux.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/tailscale/tailscaled.sock";

/// Root configuration for the file server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory to serve.
    pub dir: PathBuf,

    /// Listener settings.
    pub listener: ListenerConfig,

    /// Overlay daemon connection.
    pub tailscale: TailscaleConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            listener: ListenerConfig::default(),
            tailscale: TailscaleConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// TCP port bound on every overlay address.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: 80 }
    }
}

/// Overlay daemon configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TailscaleConfig {
    /// Path to the LocalAPI Unix socket.
    pub socket_path: PathBuf,

    /// Upper bound for a single whois lookup in seconds.
    pub whois_timeout_secs: u64,
}

impl Default for TailscaleConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            whois_timeout_secs: 10,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time allowed to produce response headers, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
