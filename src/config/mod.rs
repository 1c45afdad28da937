//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → command-line overrides (main.rs)
//!     → validation.rs (served directory must exist)
//!     → ServerConfig (validated, immutable)
//!     → passed by value/reference into startup
//! ```
//!
//! # Design Decisions
//! - Config is built once before anything is bound and never changes afterwards
//! - All fields have defaults so the server runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
pub use schema::TailscaleConfig;
pub use schema::TimeoutConfig;
