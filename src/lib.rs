//! consul-healthcheck - Consul service health probe
//!
//! Reports a service UP when any configured Consul datacentre sees its health
//! check passing, and DOWN otherwise.

pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
