//! Custom-object gateway entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration**: read flags / environment once and validate them
//!    into an immutable [`records::GatewayConfig`].
//! 2. **Wire observability**: configure `tracing-subscriber` with a pretty or
//!    JSON layer and, optionally, an OpenTelemetry OTLP exporter. All `tracing`
//!    spans and events emitted by every crate in the workspace flow through it.
//! 3. **Construct infrastructure**: create the [`hubspot::HubSpotClient`] and
//!    inject it into the [`web::Server`] as its `RecordGateway`.
//! 4. **Serve**: run until Ctrl+C or SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hubspot::HubSpotClient;
use web::Server;

mod config;
mod telemetry;

use config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let _telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let gateway_config = cli
        .gateway_config()
        .context("Invalid gateway configuration")?;

    tracing::info!(
        object_type = %gateway_config.object_type,
        api = %gateway_config.base_url,
        "Starting custom-object gateway"
    );

    let client = HubSpotClient::new(gateway_config).context("Failed to create CRM client")?;

    Server::new(cli.listen_addr(), Arc::new(client))
        .run()
        .await
        .context("Server failed")?;

    Ok(())
}
