//! Harness configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file,
//! then `MALL_E2E_*` environment overrides. Parse failures are typed so
//! a bad override fails the run up front instead of surfacing as a
//! confusing scenario error later.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "MALL_E2E_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Environment override has the wrong shape.
    #[error("invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: &'static str,
        value: String,
    },
}

/// Configuration for a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL of the backend under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Domain used for generated actor emails.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_email_domain() -> String {
    "mall-e2e.test".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            email_domain: default_email_domain(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration: defaults, then the default config file if it
    /// exists, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment
    /// overrides on top.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Default config file location (`<config dir>/mall-e2e/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mall-e2e").join("config.toml"))
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded harness config file");
        Ok(config)
    }

    /// Apply `MALL_E2E_*` overrides via the given lookup. Injected as a
    /// closure so tests can exercise overrides without touching the
    /// process environment.
    fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let base_url_var = format!("{ENV_PREFIX}BASE_URL");
        if let Some(value) = lookup(&base_url_var) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: base_url_var,
                    expected: "non-empty URL",
                    value,
                });
            }
            self.base_url = value;
        }

        let timeout_var = format!("{ENV_PREFIX}TIMEOUT_SECS");
        if let Some(value) = lookup(&timeout_var) {
            self.request_timeout_secs =
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: timeout_var,
                        expected: "positive integer seconds",
                        value,
                    })?;
        }

        let domain_var = format!("{ENV_PREFIX}EMAIL_DOMAIN");
        if let Some(value) = lookup(&domain_var) {
            if value.trim().is_empty() || value.contains('@') {
                return Err(ConfigError::InvalidValue {
                    var: domain_var,
                    expected: "bare domain name",
                    value,
                });
            }
            self.email_domain = value;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| map.get(var).map(|v| (*v).to_string())
    }

    #[test]
    fn defaults_are_sane() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let mut config = HarnessConfig::default();
        let vars = HashMap::from([
            ("MALL_E2E_BASE_URL", "http://mall.internal:9000"),
            ("MALL_E2E_TIMEOUT_SECS", "5"),
        ]);
        config.apply_env(lookup(&vars)).unwrap();
        assert_eq!(config.base_url, "http://mall.internal:9000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.email_domain, "mall-e2e.test");
    }

    #[test]
    fn bad_timeout_is_a_typed_error() {
        let mut config = HarnessConfig::default();
        let vars = HashMap::from([("MALL_E2E_TIMEOUT_SECS", "soon")]);
        let err = config.apply_env(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn email_domain_rejects_addresses() {
        let mut config = HarnessConfig::default();
        let vars = HashMap::from([("MALL_E2E_EMAIL_DOMAIN", "buyer@mall.test")]);
        assert!(config.apply_env(lookup(&vars)).is_err());
    }

    #[test]
    fn file_values_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://localhost:4444\"\nrequest_timeout_secs = 9"
        )
        .unwrap();

        let config = HarnessConfig::load_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:4444");
        assert_eq!(config.request_timeout_secs, 9);
        // Missing keys fall back to defaults.
        assert_eq!(config.email_domain, "mall-e2e.test");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [1, 2]").unwrap();

        let err = HarnessConfig::load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
