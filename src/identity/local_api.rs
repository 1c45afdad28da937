//! Client for the overlay daemon's LocalAPI.
//!
//! # Responsibilities
//! - Speak HTTP/1.1 to `tailscaled` over its Unix socket
//! - Resolve a remote address to the user and node behind it
//! - Report the local node's overlay addresses at startup
//!
//! # Design Decisions
//! - One connection per call; the daemon is local and calls are rare
//! - Connection driver runs inside the caller's future, so cancelling the
//!   caller tears the exchange down with it
//! - Every call is bounded by the configured timeout

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::config::TailscaleConfig;
use crate::identity::types::{CallerIdentity, ResolveError};
use crate::identity::IdentityResolver;

/// Host header the daemon expects on LocalAPI requests.
pub const LOCAL_API_HOST: &str = "local-tailscaled.sock";

/// Upper bound on a LocalAPI reply body.
const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// LocalAPI client bound to one daemon socket.
#[derive(Debug, Clone)]
pub struct LocalClient {
    socket_path: PathBuf,
    timeout: Duration,
}

/// Subset of the daemon's status needed to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayStatus {
    pub backend_state: String,
    pub tailscale_ips: Vec<IpAddr>,
    pub dns_name: String,
}

impl OverlayStatus {
    pub fn is_running(&self) -> bool {
        self.backend_state == "Running"
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WhoIsResponse {
    node: WhoIsNode,
    user_profile: WhoIsUser,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct WhoIsNode {
    name: String,
    computed_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct WhoIsUser {
    login_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StatusResponse {
    #[serde(default)]
    backend_state: String,
    #[serde(rename = "Self", default)]
    self_node: Option<SelfNode>,
}

#[derive(Debug, Default, Deserialize)]
struct SelfNode {
    #[serde(rename = "TailscaleIPs", default)]
    tailscale_ips: Vec<IpAddr>,
    #[serde(rename = "DNSName", default)]
    dns_name: String,
}

impl LocalClient {
    pub fn new(socket_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &TailscaleConfig) -> Self {
        Self::new(
            &config.socket_path,
            Duration::from_secs(config.whois_timeout_secs),
        )
    }

    /// Create a client and make sure the daemon is up and on the network.
    pub async fn connect(config: &TailscaleConfig) -> Result<(Self, OverlayStatus), ResolveError> {
        let client = Self::from_config(config);
        let status = client.status().await?;
        if !status.is_running() {
            return Err(ResolveError::NotRunning(status.backend_state));
        }

        tracing::info!(
            socket = %client.socket_path.display(),
            dns_name = %status.dns_name,
            addresses = ?status.tailscale_ips,
            "Connected to tailscaled"
        );
        Ok((client, status))
    }

    /// Fetch the local node's status.
    pub async fn status(&self) -> Result<OverlayStatus, ResolveError> {
        let raw: StatusResponse = self.get_json("/localapi/v0/status?peers=false").await?;
        let self_node = raw.self_node.unwrap_or_default();
        Ok(OverlayStatus {
            backend_state: raw.backend_state,
            tailscale_ips: self_node.tailscale_ips,
            dns_name: self_node.dns_name,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ResolveError> {
        let body = match timeout(self.timeout, self.exchange(path_and_query)).await {
            Ok(result) => result?,
            Err(_) => return Err(ResolveError::Timeout(self.timeout)),
        };
        Ok(serde_json::from_slice(&body)?)
    }

    /// One GET over a fresh socket connection.
    async fn exchange(&self, path_and_query: &str) -> Result<Bytes, ResolveError> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|source| ResolveError::Connect {
                path: self.socket_path.display().to_string(),
                source,
            })?;

        let (mut sender, conn) = http1::handshake::<_, Body>(TokioIo::new(stream)).await?;

        let request = Request::get(path_and_query)
            .header(header::HOST, LOCAL_API_HOST)
            .body(Body::empty())?;

        let call = async move {
            let response = sender.send_request(request).await?;
            let status = response.status();
            let body = axum::body::to_bytes(Body::new(response.into_body()), MAX_RESPONSE_BYTES)
                .await
                .map_err(|e| ResolveError::Body(e.to_string()))?;

            if status != StatusCode::OK {
                return Err(ResolveError::Status {
                    status: status.as_u16(),
                    message: String::from_utf8_lossy(&body).trim().to_string(),
                });
            }
            Ok(body)
        };

        tokio::pin!(conn);
        tokio::pin!(call);

        tokio::select! {
            result = &mut call => result,
            driven = &mut conn => {
                driven?;
                call.await
            }
        }
    }
}

#[async_trait]
impl IdentityResolver for LocalClient {
    async fn whois(&self, remote_addr: SocketAddr) -> Result<CallerIdentity, ResolveError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("addr", &remote_addr.to_string())
            .finish();

        let who: WhoIsResponse = self
            .get_json(&format!("/localapi/v0/whois?{query}"))
            .await?;

        let node_name = if who.node.computed_name.is_empty() {
            who.node.name
        } else {
            who.node.computed_name
        };

        Ok(CallerIdentity {
            login_name: who.user_profile.login_name,
            node_name,
        })
    }
}
