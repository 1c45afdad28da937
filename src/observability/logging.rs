//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the filter from `RUST_LOG`, falling back to the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when neither `RUST_LOG` nor the config give one.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(config: &ObservabilityConfig) {
    let fallback = if config.log_level.is_empty() {
        DEFAULT_FILTER
    } else {
        config.log_level.as_str()
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
