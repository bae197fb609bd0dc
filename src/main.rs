use anyhow::Context;
use probe_demo::config::Config;
use probe_demo::lifecycle;
use probe_demo::server::TerminationSignals;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Register before the startup delay so early signals are queued
    let mut signals =
        TerminationSignals::register().context("Failed to register signal handlers")?;

    let config = Config::from_env();
    info!(
        port = config.port,
        startup_delay = ?config.startup_delay,
        shutdown_delay = ?config.shutdown_delay,
        "Starting probe server"
    );

    lifecycle::run(config, async move { signals.recv().await }).await;
    Ok(())
}
