//! Error type for source registration and building.

use thiserror::Error;

/// Errors surfaced when a source list is lowered into the underlying
/// builder.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A JSON source registered with `optional = false` whose file is
    /// missing when the list is built.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The merged configuration could not be deserialized into the
    /// caller's settings type.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Any error reported by the underlying configuration system.
    #[error("configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new file-not-found error.
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_the_offending_path() {
        let err = ConfigError::file_not_found("/etc/app/appsettings.json");
        assert_eq!(
            err.to_string(),
            "configuration file not found: /etc/app/appsettings.json"
        );
    }

    #[test]
    fn test_wraps_underlying_errors() {
        let inner = config::ConfigError::NotFound("server.port".to_string());
        let err = ConfigError::from(inner);
        assert!(matches!(err, ConfigError::Source(_)));
        assert!(err.to_string().contains("server.port"));
    }
}
