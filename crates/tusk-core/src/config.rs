//! Configuration schema (.tusk.toml)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up under the project root
pub const DEFAULT_CONFIG_FILE: &str = ".tusk.toml";

/// Environment variable that replaces `database.url` when set
pub const DATABASE_URL_ENV: &str = "TUSK_DATABASE_URL";

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `dbname=postgres user=postgres`
    /// or `postgres://user@localhost/db`
    #[serde(default)]
    pub url: String,

    /// Connect over TLS
    #[serde(default)]
    pub tls: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Replace the database url with `value` when one is given
    pub fn with_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
        self
    }

    /// Apply the `TUSK_DATABASE_URL` override from the process environment
    pub fn with_env_override(self) -> Self {
        self.with_url_override(std::env::var(DATABASE_URL_ENV).ok())
    }

    /// Reject configurations that cannot be used to connect
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No database url configured. Set [database] url or {}", DATABASE_URL_ENV)]
    MissingUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_database_url() {
        let config = Config::from_toml(
            r#"
[database]
url = "dbname=postgres user=postgres"
"#,
        )
        .unwrap();

        assert_eq!(config.database.url, "dbname=postgres user=postgres");
        assert!(!config.database.tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_tls_flag() {
        let config = Config::from_toml(
            r#"
[database]
url = "host=db.example.com dbname=app"
tls = true
"#,
        )
        .unwrap();

        assert!(config.database.tls);
    }

    #[test]
    fn missing_database_section_is_a_parse_error() {
        let err = Config::from_toml("[other]\nkey = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_url_fails_validation() {
        let config = Config::from_toml("[database]\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn url_override_replaces_configured_url() {
        let config = Config::from_toml("[database]\nurl = \"dbname=a\"\n").unwrap();

        let overridden = config.clone().with_url_override(Some("dbname=b".to_string()));
        assert_eq!(overridden.database.url, "dbname=b");

        let blank = config.with_url_override(Some("  ".to_string()));
        assert_eq!(blank.database.url, "dbname=a");
    }

    #[test]
    fn from_file_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[database]\nurl = \"dbname=postgres user=postgres\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.database.url, "dbname=postgres user=postgres");
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
