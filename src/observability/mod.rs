//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request dispatcher
//!     → audit.rs (one attributed line per request)
//! Startup / shutdown
//!     → logging.rs (subscriber setup, diagnostics)
//! ```
//!
//! # Design Decisions
//! - Everything goes through `tracing`; the subscriber decides the sink
//! - Emitting a log line never fails a request

pub mod audit;
pub mod logging;
