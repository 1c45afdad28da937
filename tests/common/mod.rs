//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request};
use tempfile::TempDir;

use tailnet_share::{CallerIdentity, IdentityResolver, ResolveError, ServerConfig};

/// Resolver backed by a fixed table of peers, keyed by IP.
#[derive(Default)]
pub struct FakeResolver {
    identities: HashMap<IpAddr, CallerIdentity>,
    delays: HashMap<IpAddr, Duration>,
    calls: AtomicUsize,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peer(mut self, ip: &str, login: &str, node: &str) -> Self {
        self.identities
            .insert(ip.parse().unwrap(), CallerIdentity::new(login, node));
        self
    }

    pub fn with_delay(mut self, ip: &str, delay: Duration) -> Self {
        self.delays.insert(ip.parse().unwrap(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityResolver for FakeResolver {
    async fn whois(&self, remote_addr: SocketAddr) -> Result<CallerIdentity, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&remote_addr.ip()) {
            tokio::time::sleep(*delay).await;
        }
        self.identities
            .get(&remote_addr.ip())
            .cloned()
            .ok_or_else(|| ResolveError::Status {
                status: 404,
                message: "no match for IP:port".to_string(),
            })
    }
}

/// Scratch directory with a few media and text files, a plain subdirectory
/// and one with its own index page.
pub fn served_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "photo.gif",
        "photo.jpg",
        "photo.jpeg",
        "photo.png",
        "photo.webp",
        "clip.mp4",
        "clip.m4v",
    ] {
        std::fs::write(dir.path().join(name), vec![0u8; 2048]).unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "hello from the tailnet\n").unwrap();
    std::fs::write(dir.path().join("README"), "no extension\n").unwrap();
    std::fs::write(dir.path().join("page.html"), "<p>hi</p>\n").unwrap();
    std::fs::write(dir.path().join("data.bin"), vec![1u8; 16]).unwrap();
    std::fs::write(dir.path().join("two words & <more>.txt"), "odd name\n").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub/inner.txt"), "inner\n").unwrap();
    std::fs::create_dir(dir.path().join("site")).unwrap();
    std::fs::write(dir.path().join("site/index.html"), "<h1>site</h1>\n").unwrap();
    dir
}

pub fn config_for(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    }
}

/// GET request as if it arrived on a connection from `remote`.
pub fn request(path: &str, remote: &str, range: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(range) = range {
        builder = builder.header(header::RANGE, range);
    }
    let mut request = builder.body(Body::empty()).unwrap();
    let remote: SocketAddr = remote.parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(remote));
    request
}

/// In-memory log sink for the current thread's tracing dispatcher.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route INFO and above into this sink until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Audit messages, stripped of timestamp, level and target.
    pub fn audit_lines(&self) -> Vec<String> {
        let raw = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&raw)
            .lines()
            .filter_map(|line| line.find("audit: ").map(|idx| line[idx + 7..].to_string()))
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
