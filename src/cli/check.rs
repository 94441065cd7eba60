//! Check command implementation

use crate::cli::output::{format_report_json, format_report_table};
use crate::cli::CheckArgs;
use crate::config::{ConfigError, ConsulConfig, HealthcheckConfig, ServiceCheckConfig};
use crate::health::{build_probes, check_all, HealthReport};

/// Load configuration with env and CLI overrides
pub fn load_config_with_overrides(args: &CheckArgs) -> Result<HealthcheckConfig, ConfigError> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        HealthcheckConfig::load(Some(&args.config))?
    } else {
        tracing::debug!(path = %args.config.display(), "Config file not found, using defaults");
        HealthcheckConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Pick the checks to run and apply host, port and datacentre overrides.
///
/// Named services missing from the config get a default check, so a bare
/// `check <service>` works without a config file.
pub fn select_checks(
    config: &HealthcheckConfig,
    args: &CheckArgs,
) -> Result<ConsulConfig, ConfigError> {
    let mut checks: Vec<ServiceCheckConfig> = if args.services.is_empty() {
        config.consul.service_checks.clone()
    } else {
        args.services
            .iter()
            .map(|name| {
                config
                    .consul
                    .service_check(name)
                    .cloned()
                    .unwrap_or_else(|| ServiceCheckConfig::new(name.as_str()))
            })
            .collect()
    };

    if checks.is_empty() {
        return Err(ConfigError::Validation {
            field: "consul.service_checks".to_string(),
            message: "no service checks configured; name a service or add one to the config"
                .to_string(),
        });
    }

    for check in &mut checks {
        if let Some(ref host) = args.host {
            check.registry_host = host.clone();
        }
        if let Some(port) = args.port {
            check.registry_port = port;
        }
        if !args.datacentres.is_empty() {
            check.datacentres = args.datacentres.clone();
        }
    }

    let selected = ConsulConfig {
        timeout_seconds: config.consul.timeout_seconds,
        service_checks: checks,
    };

    HealthcheckConfig {
        consul: selected.clone(),
        logging: config.logging.clone(),
    }
    .validate()?;

    Ok(selected)
}

/// Run the selected checks once
pub async fn handle_check(
    args: &CheckArgs,
    config: &HealthcheckConfig,
) -> Result<HealthReport, Box<dyn std::error::Error>> {
    let selected = select_checks(config, args)?;
    let probes = build_probes(&selected)?;

    tracing::info!(services = probes.len(), "Running Consul health checks");
    let report = check_all(&probes).await;
    tracing::info!(
        up = report.up_count(),
        total = report.services.len(),
        "Health checks completed"
    );

    Ok(report)
}

/// Entry point for `consul-healthcheck check`.
///
/// Prints the report and returns whether every service is UP.
pub async fn run_check(args: &CheckArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(args)?;
    crate::logging::init_tracing(&config.logging)?;

    let report = handle_check(args, &config).await?;

    let output = if args.json {
        format_report_json(&report)?
    } else {
        format_report_table(&report)
    };
    println!("{}", output);

    Ok(report.is_healthy())
}
