//! Bridge demo server.
//!
//! Serves a message-style application through the kernel convention:
//!
//! ```text
//! client ─▶ axum ─▶ Bridge::handle ─▶ to-message ─▶ demo callable
//!        ◀───────────────────────── to-kernel ◀──┘
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;

use stack_bridge::config::{load_config, BridgeConfig};
use stack_bridge::convert::BufferedMessageFactory;
use stack_bridge::observability::{logging, metrics};
use stack_bridge::{demo, Bridge, BridgeServer};

#[derive(Parser)]
#[command(name = "stack-bridge")]
#[command(about = "Serve a message-style application behind a kernel-style HTTP server", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Application to serve.
    #[arg(short, long, value_enum, default_value_t = App::Hello)]
    app: App,
}

#[derive(Clone, Copy, ValueEnum)]
enum App {
    /// Always answers "hello world".
    Hello,
    /// Describes the request as JSON.
    Echo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("stack-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_size = config.conversion.max_body_size,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bridge = match cli.app {
        App::Hello => Bridge::from_callable(demo::hello_world()),
        App::Echo => Bridge::from_callable(demo::echo()),
    }
    .with_message_factory(BufferedMessageFactory::new(config.conversion.max_body_size));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = BridgeServer::new(config, bridge);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
