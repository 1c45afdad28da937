//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, request timeout)
//! - Serve on one or more listeners with connect info
//! - Drain when the shutdown flag is raised

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::delivery::FileDelivery;
use crate::http::dispatch::dispatch;
use crate::identity::IdentityResolver;
use crate::lifecycle::shutdown::{triggered, Shutdown};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn IdentityResolver>,
    pub files: FileDelivery,
}

/// HTTP server for the served directory.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and identity resolver.
    pub fn new(config: &ServerConfig, resolver: Arc<dyn IdentityResolver>) -> Self {
        let state = AppState {
            resolver,
            files: FileDelivery::new(&config.dir),
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on a single listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), io::Error> {
        serve(self.router, listener, shutdown).await
    }

    /// Run the server on every listener. Returns once all have drained, or
    /// with the first error, after stopping the rest.
    pub async fn run_all(
        self,
        listeners: Vec<TcpListener>,
        shutdown: &Shutdown,
    ) -> Result<(), io::Error> {
        let mut servers = JoinSet::new();
        for listener in listeners {
            servers.spawn(serve(self.router.clone(), listener, shutdown.subscribe()));
        }

        while let Some(joined) = servers.join_next().await {
            let result = joined.map_err(io::Error::other).and_then(|served| served);
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed, stopping remaining listeners");
                shutdown.trigger();
                servers.abort_all();
                return Err(e);
            }
        }
        Ok(())
    }
}

async fn serve(
    router: Router,
    listener: TcpListener,
    shutdown: watch::Receiver<bool>,
) -> Result<(), io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    let app = router.into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(triggered(shutdown))
        .await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}
