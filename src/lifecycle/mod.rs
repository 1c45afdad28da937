//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate directory → Connect to tailscaled → Bind overlay listeners → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → sticky watch flag → every listener drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: nothing is bound until the directory and daemon check out
//! - Fail fast: any startup error is fatal, never a partially started server

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, StartupError};
