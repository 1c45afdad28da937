//! Static file delivery.
//!
//! # Responsibilities
//! - Serve files through `ServeDir`, which owns ranges, conditional requests,
//!   index files and not-found handling
//! - List directories that have no `index.html`
//!
//! # Design Decisions
//! - Listing is read-only and never leaves the served root (`..` is refused)
//! - Directories are always addressed with a trailing slash; others are redirected
//! - Nothing here inspects `ServeDir`'s errors

use std::io;
use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Bytes escaped in listing links. `:` is included so a name never reads as a scheme.
const HREF_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Serves files from one root directory.
#[derive(Clone)]
pub struct FileDelivery {
    root: PathBuf,
    serve_dir: ServeDir,
}

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ListingEntry {
    name: String,
    is_dir: bool,
}

impl FileDelivery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            serve_dir: ServeDir::new(&root),
            root,
        }
    }

    /// Hand the request, unmodified, to the file service.
    pub async fn deliver(&self, request: Request<Body>) -> Response {
        if matches!(*request.method(), Method::GET | Method::HEAD) {
            if let Some(response) = self.directory_listing(request.uri()).await {
                return response;
            }
        }

        match self.serve_dir.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }

    /// Listing or slash redirect for directory requests; `None` defers to `ServeDir`.
    async fn directory_listing(&self, uri: &Uri) -> Option<Response> {
        let decoded = percent_decode_str(uri.path()).decode_utf8().ok()?;
        let dir = self.resolve(&decoded)?;

        let meta = fs::metadata(&dir).await.ok()?;
        if !meta.is_dir() {
            return None;
        }

        if !uri.path().ends_with('/') {
            return redirect_with_slash(uri);
        }

        let has_index = fs::metadata(dir.join("index.html"))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if has_index {
            return None;
        }

        let response = match read_entries(&dir).await {
            Ok(entries) => listing_page(&entries),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error reading directory\n").into_response()
            }
        };
        Some(response)
    }

    /// Map a decoded URL path onto the served root.
    fn resolve(&self, decoded: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                s if s.contains('\\') || s.contains('\0') => return None,
                s => path.push(s),
            }
        }
        Some(path)
    }
}

fn redirect_with_slash(uri: &Uri) -> Option<Response> {
    let location = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    let location = HeaderValue::from_str(&location).ok()?;

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
    response.headers_mut().insert(header::LOCATION, location);
    Some(response)
}

async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let is_dir = entry
            .file_type()
            .await
            .map(|kind| kind.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort();
    Ok(entries)
}

fn listing_page(entries: &[ListingEntry]) -> Response {
    let mut page = String::from(
        "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n",
    );
    for entry in entries {
        let shown = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let href = utf8_percent_encode(&shown, HREF_ESCAPE);
        page.push_str(&format!("<a href=\"{}\">{}</a>\n", href, escape_html(&shown)));
    }
    page.push_str("</pre>\n");

    let mut response = Response::new(Body::from(page));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
