//! # Message-Feed Node
//!
//! ## Startup Sequence
//!
//! 1. Install logging from `MF_*` environment variables
//! 2. Load configuration (defaults, `MF_CONFIG` file, env overrides)
//! 3. Create the in-memory message store
//! 4. Start the HTTP gateway over the store
//! 5. Serve until Ctrl+C, then drain in-flight requests

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use mf_01_message_store::{InMemoryMessageStore, MessageStoreApi};
use mf_02_message_gateway::MessageGatewayService;
use mf_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("initializing telemetry")?;

    let config = config::load_config()?;
    info!(
        addr = %config.http_addr(),
        max_request_size = config.limits.max_request_size,
        timeout_ms = config.timeouts.request.as_millis() as u64,
        "Configuration loaded"
    );

    let store: Arc<dyn MessageStoreApi> = Arc::new(InMemoryMessageStore::new());
    let service =
        MessageGatewayService::new(config, store).context("creating message gateway")?;

    service
        .run(shutdown_signal())
        .await
        .context("running message gateway")?;

    info!("Node stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
    }
}
