//! Configuration validation.
//!
//! # Responsibilities
//! - Check the served directory exists and is a directory
//!
//! # Design Decisions
//! - Runs before any listener is bound or the daemon is contacted
//! - Pure check over the filesystem, no side effects

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// Semantic configuration errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), ValidationError> {
    validate_serve_dir(&config.dir)
}

/// The served path must exist and be a directory.
pub fn validate_serve_dir(dir: &Path) -> Result<(), ValidationError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(ValidationError::InvalidDirectory(dir.to_path_buf())),
    }
}
