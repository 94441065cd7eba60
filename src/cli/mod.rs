//! CLI module for consul-healthcheck
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `check` - Run the configured service checks once
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Check every service in consul-healthcheck.toml
//! consul-healthcheck check
//!
//! # Ad-hoc check of one service against a remote agent
//! consul-healthcheck check isit-kcom-xfer --host consul-vip --dc dc1 --dc dc2
//! ```

pub mod check;
pub mod completions;
pub mod config;
pub mod output;

pub use check::handle_check;
pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// consul-healthcheck - Consul service health probe
#[derive(Parser, Debug)]
#[command(
    name = "consul-healthcheck",
    version,
    about = "Reports a service UP when any Consul datacentre sees it passing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run service checks once and report
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Services to check (default: every configured service)
    pub services: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "consul-healthcheck.toml")]
    pub config: PathBuf,

    /// Override Consul host for the selected checks
    #[arg(short = 'H', long, env = "CONSUL_HEALTHCHECK_HOST")]
    pub host: Option<String>,

    /// Override Consul port for the selected checks
    #[arg(short, long, env = "CONSUL_HEALTHCHECK_PORT")]
    pub port: Option<u16>,

    /// Override datacentres, in probe order (repeatable)
    #[arg(long = "dc")]
    pub datacentres: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "consul-healthcheck.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
