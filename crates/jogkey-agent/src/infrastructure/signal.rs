//! Process signals that request a graceful shutdown.
//!
//! The session loop only stops when its shared `running` flag is cleared, and
//! only a stopped loop runs device teardown (LEDs off, jog LED cleared,
//! handle closed).  Every signal that would otherwise end the process is
//! therefore turned into "clear the flag" instead:
//!
//! | Platform | Signals                                  |
//! |----------|------------------------------------------|
//! | Unix     | `SIGINT` (Ctrl+C), `SIGTERM` (`kill`, service stop) |
//! | Other    | Ctrl+C                                   |
//!
//! Handlers are installed by [`ShutdownSignals::register`], before anything
//! waits on them, so a signal that arrives early is not lost and does not
//! kill the process.

use std::io;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::task::JoinHandle;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Installed shutdown-signal handlers.
pub struct ShutdownSignals {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
}

impl ShutdownSignals {
    /// Installs the handlers.  Must be called from inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if a handler cannot be installed.
    #[cfg(unix)]
    pub fn register() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn register() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Waits for the first shutdown signal and returns its name.
    #[cfg(unix)]
    pub async fn recv(mut self) -> io::Result<&'static str> {
        tokio::select! {
            _ = self.interrupt.recv() => Ok("SIGINT"),
            _ = self.terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(self) -> io::Result<&'static str> {
        tokio::signal::ctrl_c().await.map(|()| "Ctrl+C")
    }
}

/// Clears `running` when the first shutdown signal arrives.
pub fn clear_on_shutdown(signals: ShutdownSignals, running: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match signals.recv().await {
            Ok(name) => {
                info!("received {name}, shutting down");
                running.store(false, Ordering::Relaxed);
            }
            Err(e) => error!("failed to listen for shutdown signals: {e}"),
        }
    })
}
