//! Identity types and error definitions.

use std::time::Duration;

use thiserror::Error;

/// Who is on the other end of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Login name of the user owning the node (e.g. `alice@example.com`).
    pub login_name: String,
    /// Full node name, possibly dotted (e.g. `laptop.tailnet.ts.net`).
    pub node_name: String,
}

impl CallerIdentity {
    pub fn new(login_name: impl Into<String>, node_name: impl Into<String>) -> Self {
        Self {
            login_name: login_name.into(),
            node_name: node_name.into(),
        }
    }

    /// Node name up to its first dot.
    pub fn node_label(&self) -> &str {
        first_label(&self.node_name)
    }
}

/// Substring before the first `.`, or the whole string if there is none.
pub fn first_label(name: &str) -> &str {
    name.split_once('.').map_or(name, |(label, _)| label)
}

/// Errors from talking to the overlay daemon.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Could not reach the daemon's socket.
    #[error("connecting to tailscaled at {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP exchange with the daemon failed.
    #[error("LocalAPI transport error: {0}")]
    Transport(#[from] hyper::Error),

    /// Request could not be built.
    #[error("LocalAPI request error: {0}")]
    Request(#[from] axum::http::Error),

    /// Reading the response body failed.
    #[error("LocalAPI body error: {0}")]
    Body(String),

    /// Daemon answered with a non-success status; the message is its reply body.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Reply did not decode.
    #[error("decoding LocalAPI response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No answer within the configured time.
    #[error("LocalAPI call timed out after {0:?}")]
    Timeout(Duration),

    /// Daemon is up but not connected to the overlay network.
    #[error("tailscaled backend state is {0:?}, want \"Running\"")]
    NotRunning(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_label_cuts_at_first_dot() {
        assert_eq!(first_label("host123.tailnet.ts.net"), "host123");
        assert_eq!(first_label("host123."), "host123");
        assert_eq!(first_label(".tailnet"), "");
    }

    #[test]
    fn first_label_without_dot_is_unchanged() {
        assert_eq!(first_label("host123"), "host123");
        assert_eq!(first_label(""), "");
    }

    #[test]
    fn node_label_uses_node_name() {
        let who = CallerIdentity::new("alice@example.com", "laptop.example.ts.net");
        assert_eq!(who.node_label(), "laptop");
    }

    #[test]
    fn status_error_shows_daemon_text() {
        let err = ResolveError::Status {
            status: 404,
            message: "no match for IP:port".to_string(),
        };
        assert_eq!(err.to_string(), "no match for IP:port");
    }
}
