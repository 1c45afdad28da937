//! Per-request dispatch.
//!
//! # Flow
//! ```text
//! Resolve  → whois(remote addr)         failure: 500 + error text, stop
//! Log      → one audit line
//! Classify → cache directive from the path extension
//! Annotate → Cache-Control for long-term media (2xx/304 only)
//! Deliver  → ServeDir with the original request
//! ```
//!
//! Each request resolves identity on its own; nothing carries over between requests.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
};

use crate::cache_policy;
use crate::http::request::RequestContext;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::audit;

/// Main handler for every path.
pub async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let ctx = RequestContext::from_request(remote_addr, &request);

    // 1. Resolve
    let who = match state.resolver.whois(ctx.remote_addr).await {
        Ok(who) => who,
        Err(e) => return response::resolution_failure(&e),
    };

    // 2. Log
    audit::log_request(&who, &ctx);

    // 3. Classify
    let directive = cache_policy::classify(&ctx.path);

    // 4-5. Deliver, then annotate the delegate's response if it delivered the file
    let mut response = state.files.deliver(request).await;
    response::apply_cache_directive(&mut response, directive);
    response
}
