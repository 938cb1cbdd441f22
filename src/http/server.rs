//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router that mounts a bridge on every path
//! - Wire up middleware (tracing, timeout, request ID)
//! - Map bridge errors to client responses
//! - Serve until the shutdown future resolves

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::http::response::error_response;

/// HTTP server exposing a bridge through its kernel convention.
pub struct BridgeServer {
    router: Router,
    config: BridgeConfig,
}

impl BridgeServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BridgeConfig, bridge: Bridge) -> Self {
        let router = Self::build_router(&config, bridge);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &BridgeConfig, bridge: Bridge) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(Arc::new(bridge))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for embedding or driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

/// Hand every request to the bridge's kernel convention.
async fn dispatch(State(bridge): State<Arc<Bridge>>, request: Request) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match bridge.handle_main(request).await {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = %response.status(),
                elapsed = ?start_time.elapsed(),
                "Request bridged"
            );
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Bridge call failed"
            );
            error_response(&*e)
        }
    }
}
