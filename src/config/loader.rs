//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.dir, PathBuf::from("."));
        assert_eq!(config.listener.port, 80);
        assert_eq!(
            config.tailscale.socket_path,
            PathBuf::from("/var/run/tailscale/tailscaled.sock")
        );
        assert_eq!(config.tailscale.whois_timeout_secs, 10);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            dir = "/srv/media"

            [tailscale]
            whois_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.dir, PathBuf::from("/srv/media"));
        assert_eq!(config.tailscale.whois_timeout_secs, 3);
        assert_eq!(
            config.tailscale.socket_path,
            PathBuf::from("/var/run/tailscale/tailscaled.sock")
        );
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = parse_config("[listener]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nport = 8080").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
