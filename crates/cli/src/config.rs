//! Process configuration.
//!
//! Every setting is read once, at startup, from a flag or its environment
//! variable. The result is turned into the immutable [`GatewayConfig`] and a
//! listen address; nothing downstream touches the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};
use records::{ConfigError, GatewayConfig, DEFAULT_API_BASE_URL};

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Custom-object gateway: list and create CRM custom-object records over HTTP.
#[derive(Parser)]
#[command(name = "cobj-gateway", version, about, long_about = None)]
pub struct CliConfig {
    /// Address to listen on.
    #[arg(long, env = "LISTEN_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// CRM private-app access token.
    #[arg(long, env = "HUBSPOT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Custom-object type id (e.g. `2-12345678` or `p_music_events`).
    #[arg(long, env = "CUSTOM_OBJECT_ID")]
    pub object_id: String,

    /// CRM API base URL.
    #[arg(long, env = "HUBSPOT_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; span export is off when unset.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl CliConfig {
    /// Validates the CRM settings into a [`GatewayConfig`].
    pub fn gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        GatewayConfig::from_raw(&self.api_url, &self.api_key, &self.object_id)
    }

    /// The socket address the server binds.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
