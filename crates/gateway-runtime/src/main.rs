//! Digital contracts gateway: REST front end for chaincode submissions.

use anyhow::{Context, Result};
use gateway_runtime::{init_logging, GatewayRuntime, LoggingConfig, RuntimeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env()).context("failed to initialize logging")?;

    let config = RuntimeConfig::load().context("failed to load configuration")?;
    info!(
        port = config.gateway.http.port,
        msp_id = %config.identity.msp_id,
        channel = %config.network.channel_id,
        chaincode = %config.network.chaincode_id,
        "Configuration loaded"
    );

    let mut runtime = GatewayRuntime::new(config).context("failed to initialize gateway")?;
    runtime.start().await.context("failed to start HTTP server")?;

    info!("Gateway is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    runtime.shutdown().await.context("unclean shutdown")?;
    Ok(())
}
