//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! tailscaled status (overlay addresses)
//!     → listener.rs (one TCP listener per overlay address)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Only overlay addresses are bound, never wildcard or public interfaces
//! - Failure to bind any of them is fatal

pub mod listener;

pub use listener::{bind_overlay, ListenerError};
