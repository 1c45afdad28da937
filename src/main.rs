//! tailnet-share
//!
//! ```text
//! tailnet peer → overlay listener (:80)
//!     → dispatch → whois via tailscaled LocalAPI
//!                → audit log line
//!                → Cache-Control policy
//!                → ServeDir(dir)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tailnet_share::config::loader::{load_config, ConfigError};
use tailnet_share::config::{ObservabilityConfig, ServerConfig};
use tailnet_share::lifecycle;
use tailnet_share::observability::logging;

#[derive(Parser)]
#[command(name = "tailnet-share")]
#[command(about = "Serve a directory read-only to peers on the tailnet", long_about = None)]
struct Cli {
    /// Directory to serve [default: .]
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the tailscaled LocalAPI socket
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Port to listen on at each overlay address [default: 80]
    #[arg(short, long)]
    port: Option<u16>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(dir) = self.dir {
            config.dir = dir;
        }
        if let Some(socket) = self.socket {
            config.tailscale.socket_path = socket;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dir = ?config.dir,
        port = config.listener.port,
        socket = ?config.tailscale.socket_path,
        "tailnet-share starting"
    );

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
