//! Cache policy classification.
//!
//! # Responsibilities
//! - Map a request path to a media type through its file extension
//! - Decide whether the resource may be cached long term by clients
//!
//! # Design Decisions
//! - Static table, no registry: the set of known types is closed
//! - Pure functions only, recomputed per request
//! - Exact extension lookup first, then ASCII-lowercased

use axum::http::HeaderValue;

/// `Cache-Control` value for resources that practically never change.
pub const LONG_TERM_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Media types that get the long-term cache policy.
const LONG_TERM_MEDIA_TYPES: &[&str] = &[
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/webp",
    "video/mp4",
    "video/x-m4v",
];

/// Extension (with leading dot) to media type.
const MEDIA_TYPES: &[(&str, &str)] = &[
    (".avif", "image/avif"),
    (".css", "text/css; charset=utf-8"),
    (".gif", "image/gif"),
    (".htm", "text/html; charset=utf-8"),
    (".html", "text/html; charset=utf-8"),
    (".ico", "image/vnd.microsoft.icon"),
    (".jfif", "image/jpeg"),
    (".jpe", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".js", "text/javascript; charset=utf-8"),
    (".json", "application/json"),
    (".m4v", "video/x-m4v"),
    (".mjs", "text/javascript; charset=utf-8"),
    (".mov", "video/quicktime"),
    (".mp3", "audio/mpeg"),
    (".mp4", "video/mp4"),
    (".mp4v", "video/mp4"),
    (".mpg4", "video/mp4"),
    (".pdf", "application/pdf"),
    (".pjp", "image/jpeg"),
    (".pjpeg", "image/jpeg"),
    (".png", "image/png"),
    (".svg", "image/svg+xml"),
    (".txt", "text/plain; charset=utf-8"),
    (".wasm", "application/wasm"),
    (".webm", "video/webm"),
    (".webp", "image/webp"),
    (".xml", "text/xml; charset=utf-8"),
    (".zip", "application/zip"),
];

/// Caching classification of a requested resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDirective {
    /// Binary media: cache publicly for a year.
    LongTerm,
    /// No cache header is added.
    Default,
}

impl CacheDirective {
    /// Header value to attach, if any.
    pub fn cache_control(self) -> Option<HeaderValue> {
        match self {
            CacheDirective::LongTerm => Some(HeaderValue::from_static(LONG_TERM_CACHE_CONTROL)),
            CacheDirective::Default => None,
        }
    }
}

/// Classify a request path.
pub fn classify(path: &str) -> CacheDirective {
    let long_term = extension(path)
        .and_then(media_type)
        .map(|media| LONG_TERM_MEDIA_TYPES.contains(&media))
        .unwrap_or(false);

    if long_term {
        CacheDirective::LongTerm
    } else {
        CacheDirective::Default
    }
}

/// Extension of the last path segment, including the leading dot.
pub fn extension(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rfind('.').map(|idx| &segment[idx..])
}

/// Media type for an extension such as `.png`.
pub fn media_type(ext: &str) -> Option<&'static str> {
    lookup(ext).or_else(|| {
        if ext.bytes().any(|b| b.is_ascii_uppercase()) {
            lookup(&ext.to_ascii_lowercase())
        } else {
            None
        }
    })
}

fn lookup(ext: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media)| *media)
}
