//! # Configuration
//!
//! Settings come from three layers, each overriding the previous one:
//!
//! 1. `lifeos.toml` (or the file given with `--config`)
//! 2. Environment variables
//! 3. Command-line flags
//!
//! ## Environment Variables
//!
//! - `LIFEOS_HOST`, `LIFEOS_PORT`: bind address of the HTTP server
//! - `LIFEOS_DATABASE`: path of the redb database file
//! - `LIFEOS_CORS_ORIGINS`: comma-separated origins, or "*" for all
//! - `LIFEOS_RATE_LIMIT`: requests per second (0 disables)
//! - `LIFEOS_LOG_FORMAT`: "text" or "json"

use lifeos_core::LifeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lifeos.toml";

/// Default global rate limit (requests per second).
pub const DEFAULT_RATE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// redb database file.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lifeos.db"),
        }
    }
}

/// CORS and rate limiting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// Allowed origins. Empty means localhost only; `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Requests per second across all clients; 0 disables the limiter.
    pub rate_limit: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// "text" or "json".
    pub format: String,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            filter: "lifeos=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `lifeos.toml` if it exists.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, LifeError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, LifeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LifeError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, LifeError> {
        toml::from_str(content).map_err(|e| LifeError::Invalid(format!("config: {}", e)))
    }

    /// Apply `LIFEOS_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Values that do not parse are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("LIFEOS_HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = lookup("LIFEOS_PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = lookup("LIFEOS_DATABASE").filter(|p| !p.trim().is_empty()) {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(origins) = lookup("LIFEOS_CORS_ORIGINS") {
            self.security.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(rps) = lookup("LIFEOS_RATE_LIMIT").and_then(|r| r.trim().parse().ok()) {
            self.security.rate_limit = rps;
        }
        if let Some(format) = lookup("LIFEOS_LOG_FORMAT").filter(|f| !f.trim().is_empty()) {
            self.log.format = format.trim().to_lowercase();
        }
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_bind_localhost() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.path, PathBuf::from("lifeos.db"));
        assert_eq!(config.security.rate_limit, DEFAULT_RATE_LIMIT);
        assert!(config.security.cors_origins.is_empty());
        assert_eq!(config.log.format, "text");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [security]
            cors_origins = ["https://life.example"]
            "#,
        )
        .expect("config");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.security.cors_origins, vec!["https://life.example"]);
        assert_eq!(config.security.rate_limit, DEFAULT_RATE_LIMIT);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[server]\nhots = \"0.0.0.0\"\n").expect_err("should fail");
        assert!(matches!(err, LifeError::Invalid(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::from_toml("[server]\nport = 9000\n")
            .expect("config")
            .with_overrides(lookup(&[
                ("LIFEOS_PORT", "7000"),
                ("LIFEOS_DATABASE", "/tmp/life.db"),
                ("LIFEOS_CORS_ORIGINS", "http://a.test, http://b.test,"),
                ("LIFEOS_RATE_LIMIT", "0"),
                ("LIFEOS_LOG_FORMAT", "JSON"),
            ]));

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/life.db"));
        assert_eq!(
            config.security.cors_origins,
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(config.security.rate_limit, 0);
        assert_eq!(config.log.format, "json");
    }

    #[test]
    fn unparsable_overrides_are_ignored() {
        let config = Config::default().with_overrides(lookup(&[
            ("LIFEOS_PORT", "eighty"),
            ("LIFEOS_RATE_LIMIT", "-1"),
            ("LIFEOS_HOST", "  "),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(LifeError::Io(_))
        ));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lifeos.toml");
        std::fs::write(&path, "[storage]\npath = \"data/life.db\"\n[log]\nformat = \"json\"\n")
            .expect("config");

        let config = Config::load(Some(&path)).expect("config");
        assert_eq!(config.storage.path, PathBuf::from("data/life.db"));
        assert_eq!(config.log.format, "json");
    }
}
