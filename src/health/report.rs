//! Aggregated results for a set of independent probes.

use super::error::HealthCheckError;
use super::status::{Health, Status};
use super::HealthIndicator;
use serde::Serialize;
use std::collections::BTreeMap;

/// How one probe invocation ended, as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum Outcome {
    Up,
    Down { details: BTreeMap<String, String> },
    /// The probe itself failed; no verdict was reached
    Error { error: String },
}

impl Outcome {
    pub fn is_up(&self) -> bool {
        matches!(self, Outcome::Up)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Up => "UP",
            Outcome::Down { .. } => "DOWN",
            Outcome::Error { .. } => "ERROR",
        }
    }
}

impl From<Result<Health, HealthCheckError>> for Outcome {
    fn from(result: Result<Health, HealthCheckError>) -> Self {
        match result {
            Ok(health) => match health.status {
                Status::Up => Outcome::Up,
                Status::Down => Outcome::Down {
                    details: health.details,
                },
            },
            Err(e) => Outcome::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Result for a single service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    pub service: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Results for every probe in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub services: Vec<ServiceReport>,
}

impl HealthReport {
    /// True only when every service is UP.
    pub fn is_healthy(&self) -> bool {
        self.services.iter().all(|s| s.outcome.is_up())
    }

    pub fn up_count(&self) -> usize {
        self.services.iter().filter(|s| s.outcome.is_up()).count()
    }
}

/// Run each probe once, one after another.
///
/// A failing probe is recorded as [`Outcome::Error`] and does not stop the
/// remaining probes.
pub async fn check_all<H: HealthIndicator>(probes: &[H]) -> HealthReport {
    let mut services = Vec::with_capacity(probes.len());

    for probe in probes {
        let outcome = Outcome::from(probe.check().await);
        tracing::debug!(service = probe.name(), outcome = outcome.label(), "Probe finished");
        services.push(ServiceReport {
            service: probe.name().to_string(),
            outcome,
        });
    }

    HealthReport { services }
}
