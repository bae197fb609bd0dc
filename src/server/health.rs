//! Probe endpoints for exercising deployment infrastructure
//!
//! - `/` - Greeting page (also served for any path without its own route)
//! - `/env` - Process environment as `KEY=VALUE` lines
//! - `/health` - 200 while healthy, 500 once `/fail` has been called
//! - `/fail` - Permanently marks the server unhealthy
//!
//! Routes accept every HTTP method.

use super::shutdown::ShutdownSignal;
use crate::error::ServerError;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::Html,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Body served by `/`
pub const GREETING: &str = r#"<p style="font-size:96px">Hello, World!</p>"#;

/// Body served by `/health` while healthy
pub const HEALTHY_BODY: &str = "Healthy";

/// Body served by `/health` after `/fail`
pub const UNHEALTHY_BODY: &str = "Not healthy";

/// Body served by `/fail`
pub const FAIL_BODY: &str = "oh no!";

/// Shared health flag
///
/// Starts healthy. Once marked unhealthy it stays that way for the rest of
/// the process lifetime; there is no way back.
#[derive(Debug, Clone)]
pub struct HealthState {
    healthy: Arc<AtomicBool>,
}

impl HealthState {
    /// Create a new health state (initially healthy)
    pub fn new() -> Self {
        Self {
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the server as unhealthy
    ///
    /// Returns true if this call flipped the flag.
    pub fn mark_unhealthy(&self) -> bool {
        self.healthy.swap(false, Ordering::SeqCst)
    }

    /// Check if the server is healthy
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Greeting handler, also the fallback for unknown paths
async fn index(method: Method, uri: Uri) -> Html<&'static str> {
    info!(method = %method, path = %uri.path(), "Serving greeting");
    Html(GREETING)
}

/// Environment dump handler
async fn env(method: Method) -> String {
    info!(method = %method, path = "/env", "Serving environment");
    render_environment()
}

/// Health probe handler
///
/// Returns 200 OK while healthy, 500 Internal Server Error after `/fail`.
async fn health(method: Method, State(state): State<HealthState>) -> (StatusCode, &'static str) {
    info!(method = %method, path = "/health", "Serving health probe");
    if state.is_healthy() {
        (StatusCode::OK, HEALTHY_BODY)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, UNHEALTHY_BODY)
    }
}

/// Failure injection handler
async fn fail(method: Method, State(state): State<HealthState>) -> &'static str {
    info!(method = %method, path = "/fail", "Serving failure injection");
    if state.mark_unhealthy() {
        warn!("Health flag cleared, /health will now report 500");
    }
    FAIL_BODY
}

/// Render the current process environment as newline-joined `KEY=VALUE` pairs
///
/// Non-UTF-8 keys or values are rendered lossily.
pub fn render_environment() -> String {
    std::env::vars_os()
        .map(|(key, value)| format!("{}={}", key.to_string_lossy(), value.to_string_lossy()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the router for the probe endpoints
pub fn build_router(health_state: HealthState) -> Router {
    Router::new()
        .route("/", any(index))
        .route("/env", any(env))
        .route("/health", any(health))
        .route("/fail", any(fail))
        .fallback(index)
        .with_state(health_state)
}

/// Run the probe server on the specified port until shutdown is signaled
///
/// On shutdown the listener stops accepting connections and in-flight
/// requests are allowed to finish. There is no drain timeout; this returns
/// once every open connection has closed.
///
/// # Arguments
/// * `port` - The port to listen on
/// * `health_state` - Shared health flag
/// * `shutdown` - Signal that triggers graceful shutdown
pub async fn run_server(
    port: u16,
    health_state: HealthState,
    mut shutdown: ShutdownSignal,
) -> Result<(), ServerError> {
    let app = build_router(health_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    // Log after successful bind - server is actually listening
    info!(port = %port, "Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    info!(port = %port, "Listener stopped");
    Ok(())
}
