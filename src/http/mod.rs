//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection on an overlay address
//!     → server.rs (Axum setup, layers, serve loop)
//!     → dispatch.rs (resolve caller, audit, classify)
//!     → response.rs (cache header, error replies)
//!     → delivery.rs (static files from the served directory)
//!     → Send to client
//! ```

pub mod delivery;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;

pub use delivery::FileDelivery;
pub use request::RequestContext;
pub use server::{AppState, HttpServer};
