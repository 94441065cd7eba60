//! Per-service Consul check configuration

use serde::{Deserialize, Serialize};

/// Consul agent host used when none is configured
pub const DEFAULT_REGISTRY_HOST: &str = "localhost";

/// Consul HTTP API port used when none is configured
pub const DEFAULT_REGISTRY_PORT: u16 = 8500;

/// Health-checks endpoint with `{host}`, `{port}`, `{service}` and `{dc}` slots
pub const DEFAULT_URI_TEMPLATE: &str = "http://{host}:{port}/v1/health/checks/{service}?dc={dc}";

fn default_registry_host() -> String {
    DEFAULT_REGISTRY_HOST.to_string()
}

fn default_registry_port() -> u16 {
    DEFAULT_REGISTRY_PORT
}

fn default_datacentres() -> Vec<String> {
    vec!["dc1".to_string(), "dc2".to_string()]
}

fn default_uri_template() -> String {
    DEFAULT_URI_TEMPLATE.to_string()
}

/// Connection parameters for monitoring one service in Consul.
///
/// Only `service_name` is required; everything else has a default, so the
/// minimal TOML entry is:
///
/// ```rust
/// use consul_healthcheck::config::ServiceCheckConfig;
///
/// let check: ServiceCheckConfig = toml::from_str(r#"service_name = "isit-kcom-xfer""#).unwrap();
/// assert_eq!(check.registry_host, "localhost");
/// assert_eq!(check.registry_port, 8500);
/// assert_eq!(check.datacentres, vec!["dc1", "dc2"]);
/// ```
///
/// The legacy property names (`consul_host`, `consul_port`, `datacentre_list`,
/// `consul_uri`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCheckConfig {
    /// Service name as registered in Consul
    #[serde(alias = "serviceName")]
    pub service_name: String,
    /// Consul agent host
    #[serde(
        default = "default_registry_host",
        alias = "consul_host",
        alias = "consulHost",
        alias = "registryHost"
    )]
    pub registry_host: String,
    /// Consul agent HTTP port
    #[serde(
        default = "default_registry_port",
        alias = "consul_port",
        alias = "consulPort",
        alias = "registryPort"
    )]
    pub registry_port: u16,
    /// Datacentres to query, in probe order
    #[serde(
        default = "default_datacentres",
        alias = "datacentre_list",
        alias = "datacentreList"
    )]
    pub datacentres: Vec<String>,
    /// Query URI template
    #[serde(
        default = "default_uri_template",
        alias = "consul_uri",
        alias = "consulUri",
        alias = "uriTemplate"
    )]
    pub uri_template: String,
}

impl ServiceCheckConfig {
    /// Check for `service_name` with every other field defaulted.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            registry_host: default_registry_host(),
            registry_port: default_registry_port(),
            datacentres: default_datacentres(),
            uri_template: default_uri_template(),
        }
    }

    pub fn with_registry(mut self, host: impl Into<String>, port: u16) -> Self {
        self.registry_host = host.into();
        self.registry_port = port;
        self
    }

    pub fn with_datacentres<I, S>(mut self, datacentres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datacentres = datacentres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_uri_template(mut self, template: impl Into<String>) -> Self {
        self.uri_template = template.into();
        self
    }

    /// Build the health-checks query URI for one datacentre.
    ///
    /// Named slots are replaced in a single pass, so substituted values are
    /// never rescanned. Legacy positional templates (`%s` four times) are
    /// filled in host, port, service, datacentre order. Unknown `{...}`
    /// sequences are copied through untouched.
    pub fn query_uri(&self, datacentre: &str) -> String {
        let port = self.registry_port.to_string();
        let positional = [
            self.registry_host.as_str(),
            port.as_str(),
            self.service_name.as_str(),
            datacentre,
        ];
        let mut next_positional = positional.iter();

        let template = self.uri_template.as_str();
        let mut uri = String::with_capacity(template.len() + 32);
        let mut rest = template;

        while let Some(idx) = rest.find(['{', '%']) {
            uri.push_str(&rest[..idx]);
            let tail = &rest[idx..];

            if let Some(after) = tail.strip_prefix("%s") {
                match next_positional.next() {
                    Some(value) => uri.push_str(value),
                    None => uri.push_str("%s"),
                }
                rest = after;
                continue;
            }

            let slot = [
                ("{host}", self.registry_host.as_str()),
                ("{port}", port.as_str()),
                ("{service}", self.service_name.as_str()),
                ("{dc}", datacentre),
            ]
            .into_iter()
            .find(|(name, _)| tail.starts_with(name));

            match slot {
                Some((name, value)) => {
                    uri.push_str(value);
                    rest = &tail[name.len()..];
                }
                None => {
                    uri.push_str(&tail[..1]);
                    rest = &tail[1..];
                }
            }
        }
        uri.push_str(rest);

        uri
    }

    /// Whether the template can vary by datacentre at all.
    pub fn has_datacentre_slot(&self) -> bool {
        self.uri_template.contains("{dc}") || self.uri_template.matches("%s").count() >= 4
    }
}
