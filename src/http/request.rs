//! Request context extraction.
//!
//! # Responsibilities
//! - Capture the parts of a request the dispatcher and audit log need
//! - Leave the request itself untouched for the file delivery step

use std::net::SocketAddr;

use axum::http::{header, Request};
use percent_encoding::percent_decode_str;

/// Per-request view used for identity lookup, auditing and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Remote address of the connection.
    pub remote_addr: SocketAddr,
    /// Percent-decoded URI path, used for cache classification.
    pub path: String,
    /// Request target as received (path and query), used for auditing.
    pub target: String,
    /// Range header value, if present and non-empty.
    pub range: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(remote_addr: SocketAddr, request: &Request<B>) -> Self {
        let range = request
            .headers()
            .get(header::RANGE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .filter(|value| !value.is_empty());

        Self {
            remote_addr,
            path: percent_decode_str(request.uri().path())
                .decode_utf8_lossy()
                .into_owned(),
            target: request.uri().to_string(),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "100.64.0.9:40000".parse().unwrap()
    }

    #[test]
    fn captures_path_query_and_range() {
        let request = Request::get("/media/a.mp4?t=10")
            .header(header::RANGE, "bytes=0-99")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(addr(), &request);
        assert_eq!(ctx.path, "/media/a.mp4");
        assert_eq!(ctx.target, "/media/a.mp4?t=10");
        assert_eq!(ctx.range.as_deref(), Some("bytes=0-99"));
        assert_eq!(ctx.remote_addr, addr());
    }

    #[test]
    fn path_is_decoded_but_target_is_not() {
        let request = Request::get("/photos/a%2Epng?x=%20").body(()).unwrap();
        let ctx = RequestContext::from_request(addr(), &request);
        assert_eq!(ctx.path, "/photos/a.png");
        assert_eq!(ctx.target, "/photos/a%2Epng?x=%20");
    }

    #[test]
    fn empty_range_counts_as_absent() {
        let request = Request::get("/").header(header::RANGE, "").body(()).unwrap();
        let ctx = RequestContext::from_request(addr(), &request);
        assert!(ctx.range.is_none());
    }

    #[test]
    fn missing_range_is_none() {
        let request = Request::get("/index.html").body(()).unwrap();
        assert!(RequestContext::from_request(addr(), &request).range.is_none());
    }
}
