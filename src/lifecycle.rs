//! Process lifecycle for the probe server
//!
//! ```text
//! start → startup delay → bind + serve → termination signal
//!       → stop accepting, drain in-flight requests → shutdown delay → exit
//! ```
//!
//! Both delays exist to imitate slow-starting and slow-draining services
//! when testing orchestration (rolling restarts, readiness gates,
//! termination grace periods).

use crate::config::Config;
use crate::server::{run_server, shutdown_channel, HealthState, TerminationSignal};
use std::future::Future;
use tracing::{error, info};

/// Run the full lifecycle until `terminate` resolves and shutdown completes
///
/// A listener that fails to bind or serve is logged and does not end the
/// lifecycle: the controller keeps waiting for `terminate` regardless.
/// Graceful shutdown has no timeout; a request that never finishes keeps
/// this from returning.
pub async fn run<F>(config: Config, terminate: F) -> TerminationSignal
where
    F: Future<Output = TerminationSignal>,
{
    if !config.startup_delay.is_zero() {
        info!(delay = ?config.startup_delay, "Delaying startup");
        tokio::time::sleep(config.startup_delay).await;
    }

    let (shutdown_controller, shutdown_signal) = shutdown_channel();
    let health_state = HealthState::new();

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = run_server(port, health_state, shutdown_signal).await {
            error!(error = %e, "Probe server failed");
        }
    });

    let received = terminate.await;
    info!(signal = %received, "Shutting down the server");

    shutdown_controller.shutdown();
    if let Err(e) = server_handle.await {
        error!(error = %e, "Probe server task did not finish cleanly");
    }

    if !config.shutdown_delay.is_zero() {
        info!(delay = ?config.shutdown_delay, "Delaying exit after shutdown");
        tokio::time::sleep(config.shutdown_delay).await;
    }

    info!("Server gracefully stopped");
    received
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
