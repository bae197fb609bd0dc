//! probe-demo: a minimal HTTP server for exercising deployment infrastructure
//!
//! Serves a greeting, an environment dump, a health probe and a failure
//! injection route, with configurable startup and shutdown delays around a
//! graceful SIGTERM/SIGINT shutdown.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod server;

#[cfg(test)]
mod test_support;
