//! Response shaping.
//!
//! # Responsibilities
//! - Attach the cache policy header to delivered files
//! - Build the reply for a failed identity lookup

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

use crate::cache_policy::CacheDirective;
use crate::identity::ResolveError;

/// Set `Cache-Control` when the directive asks for it and the file was
/// actually delivered (2xx or 304). Error replies are never marked cacheable.
pub fn apply_cache_directive(response: &mut Response, directive: CacheDirective) {
    let status = response.status();
    if !(status.is_success() || status == StatusCode::NOT_MODIFIED) {
        return;
    }
    if let Some(value) = directive.cache_control() {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
}

/// 500 reply carrying the lookup error text verbatim.
pub fn resolution_failure(err: &ResolveError) -> Response {
    let mut response = Response::new(Body::from(format!("{}\n", err)));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}
