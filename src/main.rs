//! Notification gateway
//!
//! Inbound edge of the notification service, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ axum router ──▶ NotificationController (6 entry points)
//!                                   │
//!                                   ▼
//!                           shared pipeline (EntryPoint table)
//!                             │                    │
//!                   build_envelope ok      build_envelope err
//!                             │                    │
//!                             ▼                    ▼
//!                     Dispatcher::dispatch   translate_failure
//!                             │                    │
//!                             ▼                    │
//!                  OperationHandler (http|echo)    │
//!                             │                    │
//!   Client ◀── response ◀─────┴──── OperationResult┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use notification_gateway::config::{loader, GatewayConfig};
use notification_gateway::observability::{logging, metrics};
use notification_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "notification-gateway")]
#[command(about = "Inbound edge of the notification service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "NOTIFY_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config: GatewayConfig = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::default_config()?,
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "notification-gateway starting"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
