//! HTTP server for the probe endpoints
//!
//! Serves the greeting, environment dump, health probe and failure
//! injection routes, and handles graceful shutdown on SIGTERM/SIGINT.

mod health;
pub mod shutdown;

pub use health::{
    build_router, render_environment, run_server, HealthState, FAIL_BODY, GREETING, HEALTHY_BODY,
    UNHEALTHY_BODY,
};
pub use shutdown::{
    shutdown_channel, ShutdownController, ShutdownSignal, TerminationSignal, TerminationSignals,
};

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
