//! Configuration module for consul-healthcheck
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CONSUL_HEALTHCHECK_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use consul_healthcheck::config::HealthcheckConfig;
//!
//! let toml = r#"
//! [[consul.service_checks]]
//! service_name = "isit-kcom-xfer"
//!
//! [[consul.service_checks]]
//! service_name = "isit-cnx-xfer"
//! registry_host = "consul-vip"
//! "#;
//! let config: HealthcheckConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.consul.service_checks.len(), 2);
//! assert_eq!(config.consul.service_checks[1].registry_host, "consul-vip");
//! ```

pub mod error;
pub mod logging;
pub mod service_check;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use service_check::{
    ServiceCheckConfig, DEFAULT_REGISTRY_HOST, DEFAULT_REGISTRY_PORT, DEFAULT_URI_TEMPLATE,
};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Consul section: transport settings plus one entry per monitored service.
///
/// Settings that look shared (host, port) are still repeated per entry, since
/// every entry drives its own independent probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsulConfig {
    /// Timeout for each registry query
    pub timeout_seconds: u64,
    /// Services to monitor
    #[serde(alias = "serviceChecks")]
    pub service_checks: Vec<ServiceCheckConfig>,
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            service_checks: Vec::new(),
        }
    }
}

impl ConsulConfig {
    /// Find the check entry for a service.
    pub fn service_check(&self, service_name: &str) -> Option<&ServiceCheckConfig> {
        self.service_checks
            .iter()
            .find(|check| check.service_name == service_name)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HealthcheckConfig {
    /// Consul registry checks
    pub consul: ConsulConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl HealthcheckConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports CONSUL_HEALTHCHECK_* environment variables.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("CONSUL_HEALTHCHECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CONSUL_HEALTHCHECK_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(timeout) = std::env::var("CONSUL_HEALTHCHECK_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.consul.timeout_seconds = t;
            }
        }

        self
    }

    /// Validate configuration
    ///
    /// An empty datacentre list is allowed; such a check always reports DOWN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consul.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "consul.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        for (i, check) in self.consul.service_checks.iter().enumerate() {
            if check.service_name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("consul.service_checks[{}].service_name", i),
                    message: "service name cannot be empty".to_string(),
                });
            }
            if check.registry_port == 0 {
                return Err(ConfigError::Validation {
                    field: format!("consul.service_checks[{}].registry_port", i),
                    message: "port must be non-zero".to_string(),
                });
            }
            if !check.has_datacentre_slot() {
                return Err(ConfigError::Validation {
                    field: format!("consul.service_checks[{}].uri_template", i),
                    message: "template must contain a {dc} slot".to_string(),
                });
            }
            if check.datacentres.is_empty() {
                tracing::warn!(
                    service = %check.service_name,
                    "No datacentres configured, check will always report DOWN"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_defaults() {
        let config = HealthcheckConfig::default();
        assert_eq!(config.consul.timeout_seconds, 5);
        assert!(config.consul.service_checks.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [[consul.service_checks]]
        service_name = "svc1"
        "#;

        let config: HealthcheckConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.consul.service_checks.len(), 1);
        assert_eq!(config.consul.timeout_seconds, 5); // Default
        assert_eq!(config.consul.service_checks[0], ServiceCheckConfig::new("svc1"));
    }

    #[test]
    fn test_config_parse_example_file() {
        let toml = include_str!("../../consul-healthcheck.example.toml");
        let config: HealthcheckConfig = toml::from_str(toml).unwrap();
        assert!(!config.consul.service_checks.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_legacy_section_names() {
        let toml = r#"
        [consul]
        [[consul.serviceChecks]]
        serviceName = "isit-kcom-xfer"
        consulHost = "consul-vip"
        "#;

        let config: HealthcheckConfig = toml::from_str(toml).unwrap();
        let check = config.consul.service_check("isit-kcom-xfer").unwrap();
        assert_eq!(check.registry_host, "consul-vip");
    }

    #[test]
    fn test_service_check_lookup_missing() {
        let config = HealthcheckConfig::default();
        assert!(config.consul.service_check("nope").is_none());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            "[consul]\ntimeout_seconds = 2\n\n[[consul.service_checks]]\nservice_name = \"svc1\"\n",
        )
        .unwrap();

        let config = HealthcheckConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.consul.timeout_seconds, 2);
        assert_eq!(config.consul.service_checks[0].service_name, "svc1");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[[consul.service_checks]]\nregistry_port = 1\n").unwrap();

        let result = HealthcheckConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = HealthcheckConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = HealthcheckConfig::load(None).unwrap();
        assert_eq!(config, HealthcheckConfig::default());
    }

    #[test]
    fn test_config_env_overrides() {
        std::env::set_var("CONSUL_HEALTHCHECK_LOG_LEVEL", "debug");
        std::env::set_var("CONSUL_HEALTHCHECK_LOG_FORMAT", "json");
        std::env::set_var("CONSUL_HEALTHCHECK_TIMEOUT", "12");
        let config = HealthcheckConfig::default().with_env_overrides();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.consul.timeout_seconds, 12);

        // Invalid values keep the default, not crash
        std::env::set_var("CONSUL_HEALTHCHECK_LOG_FORMAT", "xml");
        std::env::set_var("CONSUL_HEALTHCHECK_TIMEOUT", "soon");
        let config = HealthcheckConfig::default().with_env_overrides();
        std::env::remove_var("CONSUL_HEALTHCHECK_LOG_LEVEL");
        std::env::remove_var("CONSUL_HEALTHCHECK_LOG_FORMAT");
        std::env::remove_var("CONSUL_HEALTHCHECK_TIMEOUT");

        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.consul.timeout_seconds, 5);
    }

    #[test]
    fn test_config_validation_empty_service_name() {
        let mut config = HealthcheckConfig::default();
        config.consul.service_checks.push(ServiceCheckConfig::new(""));

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("service_name")
        ));
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = HealthcheckConfig::default();
        config
            .consul
            .service_checks
            .push(ServiceCheckConfig::new("svc1").with_registry("localhost", 0));

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("registry_port")
        ));
    }

    #[test]
    fn test_config_validation_template_without_datacentre() {
        let mut config = HealthcheckConfig::default();
        config.consul.service_checks.push(
            ServiceCheckConfig::new("svc1").with_uri_template("http://{host}:{port}/v1/health"),
        );

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("uri_template")
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = HealthcheckConfig::default();
        config.consul.timeout_seconds = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "consul.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_allows_empty_datacentres() {
        let mut config = HealthcheckConfig::default();
        config
            .consul
            .service_checks
            .push(ServiceCheckConfig::new("svc1").with_datacentres(Vec::<String>::new()));

        assert!(config.validate().is_ok());
    }
}
