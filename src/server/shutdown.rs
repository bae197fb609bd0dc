//! Graceful shutdown handling for the probe server
//!
//! SIGTERM and SIGINT end the serve phase:
//! - The listener stops accepting new connections
//! - In-flight requests run to completion
//! - The lifecycle controller then applies the shutdown delay
//!
//! Handlers are registered before the startup delay, so a signal that
//! arrives while the process is still sleeping is not lost.

use std::fmt;
use tokio::sync::watch;
use tracing::info;

/// Termination signal that ended the serve phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGINT, or Ctrl+C on non-unix platforms
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl TerminationSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered SIGTERM/SIGINT handlers
#[cfg(unix)]
pub struct TerminationSignals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    /// Register handlers for SIGTERM and SIGINT
    ///
    /// Fails only if the OS refuses the registration.
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for the next SIGTERM or SIGINT
    pub async fn recv(&mut self) -> TerminationSignal {
        let received = tokio::select! {
            _ = self.sigterm.recv() => TerminationSignal::Terminate,
            _ = self.sigint.recv() => TerminationSignal::Interrupt,
        };
        info!(signal = %received, "Received termination signal");
        received
    }
}

/// Ctrl+C handler (non-unix)
#[cfg(not(unix))]
pub struct TerminationSignals {
    _private: (),
}

#[cfg(not(unix))]
impl TerminationSignals {
    pub fn register() -> std::io::Result<Self> {
        Ok(Self { _private: () })
    }

    /// Wait for Ctrl+C
    ///
    /// If the handler cannot be installed this never returns, leaving the
    /// process to be stopped from outside.
    pub async fn recv(&mut self) -> TerminationSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to wait for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!(signal = "CTRL_C", "Received termination signal");
        TerminationSignal::Interrupt
    }
}

/// Receiving half of the shutdown channel
///
/// Handed to the listener so it knows when to stop accepting.
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // Controller dropped, treat as shutdown
                break;
            }
        }
    }

    /// Check if shutdown was signaled (non-blocking)
    #[cfg(test)]
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Sending half of the shutdown channel
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Trigger shutdown
    pub fn shutdown(&self) {
        self.sender.send_replace(true);
        info!("Shutdown signal sent");
    }
}

/// Create a new shutdown signal pair
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}
