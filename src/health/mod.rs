//! Health checking module for Consul-registered services.
//!
//! A [`ConsulHealthcheck`] is bound to one [`ServiceCheckConfig`] and answers a
//! single point-in-time question: does any configured datacentre report the
//! service as passing? Datacentres are queried in order and the first passing
//! one ends the check.

mod error;
mod fetch;
mod report;
mod status;


pub use error::*;
pub use fetch::*;
pub use report::*;
pub use status::*;

use crate::config::{ConsulConfig, ServiceCheckConfig};
use async_trait::async_trait;

/// Text Consul embeds in a check's `Output` when the service's own HTTP check passed.
///
/// This is a substring scan over the whole body, not a structured field
/// check; a failing check whose notes happen to contain the marker would be
/// read as passing.
pub const SUCCESS_MARKER: &str = "200 OK";

/// Detail value reported against the service name when no datacentre passed.
pub const ALL_NODES_DOWN: &str = "All nodes down";

/// Something that can produce an on-demand health verdict.
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Name the verdict is reported under.
    fn name(&self) -> &str;

    /// Run the check once.
    ///
    /// # Returns
    ///
    /// - `Ok(Health)` with status UP or DOWN when every query completed
    /// - `Err(HealthCheckError)` when a query could not be completed
    async fn check(&self) -> Result<Health, HealthCheckError>;
}

/// Probe for a single service across its configured datacentres.
///
/// Holds no mutable state, so concurrent `check` calls are independent.
pub struct ConsulHealthcheck<F = HttpFetcher> {
    config: ServiceCheckConfig,
    fetcher: F,
}

impl ConsulHealthcheck<HttpFetcher> {
    /// Create a probe with its own HTTP client.
    pub fn new(config: ServiceCheckConfig, timeout_seconds: u64) -> Result<Self, TransportError> {
        Ok(Self::with_fetcher(config, HttpFetcher::new(timeout_seconds)?))
    }
}

impl<F: Fetcher> ConsulHealthcheck<F> {
    /// Create a probe with a custom fetcher (for testing).
    pub fn with_fetcher(config: ServiceCheckConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ServiceCheckConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Whether a health-checks response body counts as passing.
    pub fn is_passing(body: &str) -> bool {
        body.contains(SUCCESS_MARKER)
    }
}

#[async_trait]
impl<F: Fetcher> HealthIndicator for ConsulHealthcheck<F> {
    fn name(&self) -> &str {
        &self.config.service_name
    }

    async fn check(&self) -> Result<Health, HealthCheckError> {
        let service = &self.config.service_name;
        let mut service_up = false;

        for dc in &self.config.datacentres {
            let uri = self.config.query_uri(dc);
            tracing::debug!(
                service = %service,
                datacentre = %dc,
                uri = %uri,
                "Querying Consul health checks"
            );

            let result = self.fetcher.fetch(&uri).await;
            let body = match result {
                Ok(body) => body,
                Err(source) => {
                    tracing::warn!(
                        service = %service,
                        datacentre = %dc,
                        error = %source,
                        "Consul query failed, aborting check"
                    );
                    return Err(HealthCheckError::Transport {
                        service: service.clone(),
                        datacentre: dc.clone(),
                        uri,
                        source,
                    });
                }
            };

            if Self::is_passing(&body) {
                tracing::debug!(service = %service, datacentre = %dc, "Service passing");
                service_up = true;
                break;
            }
            tracing::debug!(service = %service, datacentre = %dc, "Service not passing");
        }

        if service_up {
            tracing::info!(service = %service, "Service is UP");
            Ok(Health::up())
        } else {
            tracing::warn!(
                service = %service,
                datacentres = self.config.datacentres.len(),
                "No datacentre reports service passing"
            );
            Ok(Health::down().with_detail(service.clone(), ALL_NODES_DOWN))
        }
    }
}

/// Build one independent probe per configured service check.
pub fn build_probes(config: &ConsulConfig) -> Result<Vec<ConsulHealthcheck>, TransportError> {
    config
        .service_checks
        .iter()
        .cloned()
        .map(|check| ConsulHealthcheck::new(check, config.timeout_seconds))
        .collect()
}
